use crate::{
    codec::Codec,
    ink::{
        ink_cost,
        Deduction,
        InkTank,
    },
    model::verdict::Verdict,
};
use anyhow::Result;
use futures::SinkExt;
use log::info;
use tokio::io::{
    AsyncRead,
    AsyncWrite,
};
use tokio_stream::StreamExt;
use tokio_util::codec::Framed;

/// Default cap on the content of a single job, in bytes.
pub const DEFAULT_MAX_JOB_SIZE: usize = 1024 * 1024;

/// The shared printer. One instance serves every connection of a server
/// process, so all jobs draw from the same [`InkTank`].
#[derive(Debug)]
pub struct Printer {
    ink: InkTank,
    max_job_size: usize,
}

impl Printer {
    pub fn new(ink: InkTank, max_job_size: usize) -> Self {
        Self { ink, max_job_size }
    }

    pub async fn ink_level(&self) -> f64 {
        self.ink.level().await
    }

    /// Handles one connection: reads a job, charges ink for it and answers
    /// with a single line. The stream is dropped, and thus closed, on return.
    pub async fn process<S>(&self, stream: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut framed = Framed::new(stream, Codec::new(self.max_job_size));

        let Some(job) = framed.next().await.transpose()? else {
            info!("Connection closed before a filename arrived");
            return Ok(());
        };

        let cost = ink_cost(job.char_count());
        info!("Got job {} [cost={}]", job, cost);

        let verdict = match self.ink.try_deduct(cost).await {
            Deduction::Deducted { remaining } => Verdict::Printed {
                filename: job.filename,
                remaining,
            },
            Deduction::Insufficient { remaining } => Verdict::OutOfInk {
                filename: job.filename,
                remaining,
            },
        };
        info!("{}", verdict);

        framed.send(verdict.to_string()).await?;

        Ok(())
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(InkTank::full(), DEFAULT_MAX_JOB_SIZE)
    }
}
