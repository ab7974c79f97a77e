use crate::error::{Error, ErrorKind, ErrorStage};
use crate::options::EncodeOptions;
use crate::text::string::{escape_string_into, escaped_len};
use crate::Result;

pub(crate) struct Writer {
    buffer: String,
    pub(crate) options: EncodeOptions,
}

impl Writer {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            buffer: String::new(),
            options,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn finish_bytes(self) -> Vec<u8> {
        self.buffer.into_bytes()
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.buffer
            .try_reserve(additional)
            .map_err(|_| Error::out_of_memory(ErrorStage::Serialize))
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.reserve(s.len())?;
        self.buffer.push_str(s);
        Ok(())
    }

    pub fn write_char(&mut self, ch: char) -> Result<()> {
        self.reserve(ch.len_utf8())?;
        self.buffer.push(ch);
        Ok(())
    }

    pub fn write_quoted_string(&mut self, s: &str) -> Result<()> {
        self.reserve(escaped_len(s, &self.options) + 2)?;
        self.buffer.push('"');
        escape_string_into(&mut self.buffer, s, &self.options);
        self.buffer.push('"');
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(value))
    }

    /// Shortest text that reads back as the same `f64`; always has a `.` or
    /// an exponent.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::serialize(
                ErrorKind::NonFiniteFloat,
                format!("{value} has no JSON representation"),
            ));
        }
        let mut buf = ryu::Buffer::new();
        self.write_str(buf.format_finite(value))
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_str(if value { "true" } else { "false" })
    }
}
