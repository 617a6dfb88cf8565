use std::io::{self, Write};

pub trait Writer {
    fn write(&mut self, buf: &Vec<u8>) -> io::Result<()>;
}

/// Writes each buffer followed by a newline, in a single write.
pub struct LineWriter<W> {
    inner: W,
    line: Vec<u8>,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            line: Vec::new(),
        }
    }
}

impl<W: Write> Writer for LineWriter<W> {
    fn write(&mut self, buf: &Vec<u8>) -> io::Result<()> {
        self.line.clear();
        self.line.extend_from_slice(buf);
        self.line.push(b'\n');
        self.inner.write_all(&self.line)
    }
}
