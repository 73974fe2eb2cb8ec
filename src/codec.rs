use crate::model::job::{
    PrintJob,
    TERMINATOR,
};
use anyhow::bail;
use bytes::BytesMut;
use tokio_util::codec::{
    Decoder,
    Encoder,
    LinesCodec,
};

/// Server side of the job protocol: decodes one [`PrintJob`] from a filename
/// line followed by content lines up to [`TERMINATOR`], and encodes response
/// lines.
#[derive(Debug, Clone)]
pub struct Codec {
    lines: LinesCodec,
    max_job_size: usize,
    filename: Option<String>,
    content: String,
    finished: bool,
}

impl Codec {
    pub fn new(max_job_size: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_job_size),
            max_job_size,
            filename: None,
            content: String::new(),
            finished: false,
        }
    }

    fn push_line(&mut self, line: String) -> anyhow::Result<Option<PrintJob>> {
        let Some(filename) = self.filename.as_ref() else {
            self.filename = Some(line);
            return Ok(None);
        };

        if line == TERMINATOR {
            let job = PrintJob::new(filename.clone(), std::mem::take(&mut self.content));
            self.filename = None;
            self.finished = true;
            return Ok(Some(job));
        }

        if self.content.len() + line.len() + 1 > self.max_job_size {
            bail!(
                "Job {} exceeds the maximum size of {} bytes",
                filename,
                self.max_job_size
            );
        }

        self.content.push_str(&line);
        self.content.push('\n');
        Ok(None)
    }
}

impl Decoder for Codec {
    type Error = anyhow::Error;
    type Item = PrintJob;

    fn decode(&mut self, src: &mut BytesMut) -> anyhow::Result<Option<Self::Item>, Self::Error> {
        // Anything after the terminator is ignored.
        if self.finished {
            return Ok(None);
        }

        while let Some(line) = self.lines.decode(src)? {
            if let Some(job) = self.push_line(line)? {
                return Ok(Some(job));
            }
        }

        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> anyhow::Result<Option<Self::Item>, Self::Error> {
        if self.finished {
            return Ok(None);
        }

        while let Some(line) = self.lines.decode_eof(src)? {
            if let Some(job) = self.push_line(line)? {
                return Ok(Some(job));
            }
        }

        // Stream ended without a terminator: whatever arrived is the job.
        // Without a filename there is no job at all.
        match self.filename.take() {
            Some(filename) => {
                self.finished = true;
                Ok(Some(PrintJob::new(filename, std::mem::take(&mut self.content))))
            }
            None => Ok(None),
        }
    }
}

impl<T: AsRef<str>> Encoder<T> for Codec {
    type Error = anyhow::Error;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> anyhow::Result<(), Self::Error> {
        self.lines.encode(line, dst)?;
        Ok(())
    }
}
