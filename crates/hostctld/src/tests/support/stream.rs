//! In-memory stream that replays scripted receives.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

enum Step {
    Data(Vec<u8>),
    Interrupted,
    Reset,
}

/// Each scripted chunk is returned by exactly one `read`, mirroring one TCP
/// receive. Once the script is exhausted, reads return zero bytes.
#[derive(Default)]
pub(crate) struct ScriptedStream {
    reads: VecDeque<Step>,
    writes: Vec<Vec<u8>>,
    broken_pipe: bool,
}

impl ScriptedStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn receive(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.reads.push_back(Step::Data(bytes.into()));
        self
    }

    pub(crate) fn interrupt(mut self) -> Self {
        self.reads.push_back(Step::Interrupted);
        self
    }

    pub(crate) fn reset(mut self) -> Self {
        self.reads.push_back(Step::Reset);
        self
    }

    pub(crate) fn broken_pipe(mut self) -> Self {
        self.broken_pipe = true;
        self
    }

    pub(crate) fn push(&mut self, bytes: impl Into<Vec<u8>>) {
        self.reads.push_back(Step::Data(bytes.into()));
    }

    pub(crate) fn unread(&self) -> usize {
        self.reads.len()
    }

    pub(crate) fn replies(&self) -> Vec<String> {
        self.writes
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reads.pop_front() {
            None => Ok(0),
            Some(Step::Interrupted) => Err(io::Error::from(io::ErrorKind::Interrupted)),
            Some(Step::Reset) => Err(io::Error::from(io::ErrorKind::ConnectionReset)),
            Some(Step::Data(mut data)) => {
                let taken = data.len().min(buf.len());
                let rest = data.split_off(taken);
                if let Some(target) = buf.get_mut(..taken) {
                    target.copy_from_slice(&data);
                }
                if !rest.is_empty() {
                    self.reads.push_front(Step::Data(rest));
                }
                Ok(taken)
            }
        }
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.broken_pipe {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
