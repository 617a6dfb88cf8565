use std::io::{self, Write};
use std::net::TcpStream;

/// Opens a fresh connection to the collector for every flush.
pub trait Connector {
    fn connect(&mut self) -> io::Result<Box<dyn Write>>;

    fn describe(&self) -> String;
}

pub struct TcpConnector {
    host: String,
    port: u16,
}

impl TcpConnector {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_owned(),
            port,
        }
    }
}

impl Connector for TcpConnector {
    fn connect(&mut self) -> io::Result<Box<dyn Write>> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))?;
        Ok(Box::new(stream))
    }

    fn describe(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Collects everything written, over all connections.
    #[derive(Clone, Default)]
    pub struct MemoryConnector {
        pub written: Rc<RefCell<Vec<u8>>>,
        pub connections: Rc<RefCell<usize>>,
        /// Number of writes each connection accepts before failing.
        pub fail_after: Option<usize>,
    }

    impl MemoryConnector {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_after(writes: usize) -> Self {
            Self {
                fail_after: Some(writes),
                ..Self::default()
            }
        }

        pub fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.written.borrow())
                .lines()
                .map(String::from)
                .collect()
        }
    }

    struct MemoryConnection {
        written: Rc<RefCell<Vec<u8>>>,
        budget: Option<usize>,
    }

    impl Write for MemoryConnection {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Some(budget) = self.budget.as_mut() {
                if *budget == 0 {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"));
                }
                *budget -= 1;
            }
            self.written.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Connector for MemoryConnector {
        fn connect(&mut self) -> io::Result<Box<dyn Write>> {
            *self.connections.borrow_mut() += 1;
            Ok(Box::new(MemoryConnection {
                written: Rc::clone(&self.written),
                budget: self.fail_after,
            }))
        }

        fn describe(&self) -> String {
            "memory".to_owned()
        }
    }

    pub struct RefusingConnector;

    impl Connector for RefusingConnector {
        fn connect(&mut self) -> io::Result<Box<dyn Write>> {
            Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
        }

        fn describe(&self) -> String {
            "wavefront.localnet:2878".to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    #[test]
    fn test_tcp_connector() -> io::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();

        let server = thread::spawn(move || -> io::Result<Vec<u8>> {
            let (mut conn, _) = listener.accept()?;
            let mut buf = Vec::new();
            conn.read_to_end(&mut buf)?;
            Ok(buf)
        });

        let mut connector = TcpConnector::new("127.0.0.1", port);
        assert_eq!(connector.describe(), format!("127.0.0.1:{}", port));

        let mut conn = connector.connect()?;
        conn.write_all(b"foo.1 1 0 source=h\n")?;
        drop(conn);

        let received = server.join().expect("server thread panicked")?;
        assert_eq!(received, b"foo.1 1 0 source=h\n".to_vec());
        Ok(())
    }
}
