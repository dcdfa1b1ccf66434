//! Non-blocking line input.
//!
//! Every read is preceded by a zero-timeout readiness check, so draining the
//! input never waits for data that has not arrived yet.

use std::collections::VecDeque;
use std::io;

/// A source of newline-terminated records.
pub trait LineSource {
    /// Returns the next complete line if one is available right now.
    fn poll_line(&mut self) -> io::Result<Option<String>>;

    /// Collects every line currently available.
    fn drain(&mut self) -> io::Result<Vec<String>> {
        let mut lines = vec![];
        while let Some(line) = self.poll_line()? {
            lines.push(line);
        }
        Ok(lines)
    }
}

/// Pre-loaded lines; handy for scripted runs and tests.
impl LineSource for VecDeque<String> {
    fn poll_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.pop_front())
    }
}

#[cfg(unix)]
pub use self::unix::{PollingReader, stdin};

#[cfg(unix)]
mod unix {
    use super::*;
    use std::fs::File;
    use std::io::Read;
    use std::os::fd::{AsFd, AsRawFd, RawFd};
    use tracing::{debug, info};

    /// Longest record kept while waiting for its newline.
    const MAX_LINE: usize = 64 * 1024;

    /// True if `fd` has data (or a hangup) pending.
    fn ready(fd: RawFd) -> io::Result<bool> {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `pfd` is a valid pollfd for the duration of the call.
        let rc = unsafe { libc::poll(&mut pfd, 1, 0) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }
        Ok(rc > 0 && pfd.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0)
    }

    /// Reads whole lines from a descriptor without ever blocking.
    ///
    /// At most one `read` is issued per readiness check; bytes after the last
    /// newline stay pending until the rest of the record arrives. Lines are
    /// decoded lossily, so invalid UTF-8 reaches the parser as junk instead
    /// of failing the read.
    pub struct PollingReader<R> {
        fd: RawFd,
        inner: R,
        pending: Vec<u8>,
        eof: bool,
    }

    impl<R: Read + AsRawFd> PollingReader<R> {
        pub fn new(inner: R) -> Self {
            Self {
                fd: inner.as_raw_fd(),
                inner,
                pending: vec![],
                eof: false,
            }
        }

        pub fn is_eof(&self) -> bool {
            self.eof
        }

        /// Bytes received that do not yet form a complete line.
        pub fn pending(&self) -> usize {
            self.pending.len()
        }

        fn take_line(&mut self) -> Option<String> {
            let end = match self.pending.iter().position(|&b| b == b'\n') {
                Some(i) => i + 1,
                None if self.eof && !self.pending.is_empty() => self.pending.len(),
                None => return None,
            };
            let bytes = self.pending.drain(..end).collect::<Vec<u8>>();
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }

        /// One non-blocking read into the pending buffer. Returns false if
        /// nothing could be read right now.
        fn fill(&mut self) -> io::Result<bool> {
            if !ready(self.fd)? {
                return Ok(false);
            }
            let mut buf = [0u8; 4096];
            match self.inner.read(&mut buf) {
                Ok(0) => {
                    info!("input closed");
                    self.eof = true;
                }
                Ok(n) => {
                    self.pending.extend_from_slice(&buf[..n]);
                    if self.pending.len() > MAX_LINE && !self.pending.contains(&b'\n') {
                        debug!("dropping {} bytes without a newline", self.pending.len());
                        self.pending.clear();
                    }
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                    ) =>
                {
                    return Ok(false);
                }
                Err(e) => return Err(e),
            }
            Ok(true)
        }
    }

    impl<R: Read + AsRawFd> LineSource for PollingReader<R> {
        fn poll_line(&mut self) -> io::Result<Option<String>> {
            loop {
                if let Some(line) = self.take_line() {
                    return Ok(Some(line));
                }
                if self.eof || !self.fill()? {
                    return Ok(None);
                }
            }
        }
    }

    /// Standard input behind a private descriptor, so the standard library's
    /// own stdin buffer cannot hide data from the readiness check.
    pub fn stdin() -> io::Result<PollingReader<File>> {
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(PollingReader::new(File::from(fd)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::net::UnixStream;

    #[test]
    fn drains_available_lines_without_blocking() {
        let (mut tx, rx) = UnixStream::pair().unwrap();
        let mut src = PollingReader::new(rx);
        assert_eq!(src.poll_line().unwrap(), None);

        tx.write_all(b"bot 0.5 0.5\nwall 0 1 1 1\n").unwrap();
        tx.flush().unwrap();
        let lines = src.drain().unwrap();
        assert_eq!(lines, vec!["bot 0.5 0.5\n", "wall 0 1 1 1\n"]);
        assert_eq!(src.poll_line().unwrap(), None);

        tx.write_all(b"bot 1.5 0.5\n").unwrap();
        assert_eq!(src.poll_line().unwrap().as_deref(), Some("bot 1.5 0.5\n"));
    }

    #[test]
    fn hangup_is_reported_once() {
        let (mut tx, rx) = UnixStream::pair().unwrap();
        let mut src = PollingReader::new(rx);
        tx.write_all(b"wall 0 0 1 0\n").unwrap();
        drop(tx);
        assert_eq!(src.drain().unwrap(), vec!["wall 0 0 1 0\n"]);
        assert!(src.is_eof());
        assert_eq!(src.poll_line().unwrap(), None);
    }

    #[test]
    fn partial_record_waits_for_its_newline() {
        let (mut tx, rx) = UnixStream::pair().unwrap();
        let mut src = PollingReader::new(rx);
        tx.write_all(b"bot 0.5").unwrap();
        let t = std::time::Instant::now();
        assert_eq!(src.poll_line().unwrap(), None);
        assert!(t.elapsed() < std::time::Duration::from_millis(100));
        assert_eq!(src.pending(), 7);

        tx.write_all(b" 0.5\nwall 0 1").unwrap();
        assert_eq!(src.drain().unwrap(), vec!["bot 0.5 0.5\n"]);
        tx.write_all(b" 1 1\n").unwrap();
        assert_eq!(src.drain().unwrap(), vec!["wall 0 1 1 1\n"]);
        assert_eq!(src.pending(), 0);
    }

    #[test]
    fn invalid_utf8_does_not_stop_the_stream() {
        let (mut tx, rx) = UnixStream::pair().unwrap();
        let mut src = PollingReader::new(rx);
        tx.write_all(b"bot 0.5 0.5\n\xff\xfe junk\nwall 0 1 1 1\n").unwrap();
        let lines = src.drain().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "bot 0.5 0.5\n");
        assert!(lines[1].ends_with(" junk\n"));
        assert_eq!(lines[2], "wall 0 1 1 1\n");
    }

    #[test]
    fn trailing_fragment_is_flushed_at_hangup() {
        let (mut tx, rx) = UnixStream::pair().unwrap();
        let mut src = PollingReader::new(rx);
        tx.write_all(b"wall 0 0 1 0\nbot 0.5 0.5").unwrap();
        drop(tx);
        assert_eq!(src.drain().unwrap(), vec!["wall 0 0 1 0\n", "bot 0.5 0.5"]);
        assert!(src.is_eof());
    }

    #[test]
    fn scripted_source_yields_in_order() {
        let mut src: VecDeque<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(LineSource::drain(&mut src).unwrap(), vec!["a", "b"]);
        assert_eq!(src.poll_line().unwrap(), None);
    }
}
