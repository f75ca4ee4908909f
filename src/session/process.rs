//! One solver child process.
//!
//! stdout is drained by a reader thread into a bounded channel; the channel
//! disconnects when the child's stdout reaches EOF. Console bytes are decoded
//! lossily, so a stray Latin-1 byte never stops the drain. The child is
//! killed and reaped on every exit path, including drop.

use super::config::SolverConfig;
use super::error::SessionError;
use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub(crate) struct SolverProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    console: Receiver<String>,
    reader: Option<JoinHandle<()>>,
    drain_timeout: Duration,
    lines_seen: usize,
    finished: bool,
}

impl SolverProcess {
    /// Launch the solver in the working directory with piped stdin/stdout.
    pub(crate) fn spawn(config: &SolverConfig) -> Result<Self, SessionError> {
        let program = config.resolved_executable();
        let mut child = Command::new(&program)
            .args(&config.arguments)
            .current_dir(&config.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SessionError::Spawn {
                program: program.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SessionError::MissingPipe {
                stream: "stdin/stdout",
            });
        };

        let (sender, console) = mpsc::sync_channel(config.channel_capacity);
        let reader = thread::spawn(move || {
            let mut stdout = BufReader::new(stdout);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match stdout.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf)
                            .trim_end_matches(|c: char| c == '\n' || c == '\r')
                            .to_string();
                        if sender.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
        });

        tracing::debug!(program = ?program, pid = child.id(), "solver started");
        Ok(Self {
            child,
            stdin: Some(stdin),
            console,
            reader: Some(reader),
            drain_timeout: config.settle_time(),
            lines_seen: 0,
            finished: false,
        })
    }

    /// Write one line to the solver's stdin.
    pub(crate) fn send(&mut self, input: &str) -> Result<(), SessionError> {
        let handshake = |source| SessionError::Handshake {
            input: input.to_string(),
            source,
        };
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            handshake(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "stdin already closed",
            ))
        })?;
        writeln!(stdin, "{input}").map_err(handshake)?;
        stdin.flush().map_err(handshake)?;
        tracing::debug!(input, "sent to solver");
        Ok(())
    }

    /// Keep draining console output until `wait` has elapsed.
    ///
    /// There is no completion signal; this is a fixed pause. It ends early
    /// only when the solver has closed its stdout.
    pub(crate) fn settle(&mut self, wait: Duration) {
        let deadline = Instant::now() + wait;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.console.recv_timeout(remaining) {
                Ok(line) => self.log_line(&line),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn log_line(&mut self, line: &str) {
        self.lines_seen += 1;
        tracing::trace!(target: "theriak_path::console", "{line}");
    }

    /// Kill and reap the child, drain what is left, join the reader.
    ///
    /// The drain is bounded by the settle time: a grandchild still holding
    /// stdout leaves the reader detached instead of blocking here. Safe to
    /// call more than once.
    pub(crate) fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.stdin = None;

        if let Err(err) = self.child.kill() {
            tracing::debug!(error = %err, "solver already exited");
        }
        match self.child.wait() {
            Ok(status) => tracing::debug!(%status, "solver reaped"),
            Err(err) => tracing::warn!(error = %err, "failed to reap solver"),
        }

        let deadline = Instant::now() + self.drain_timeout;
        let closed = loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.console.recv_timeout(remaining) {
                Ok(line) => self.log_line(&line),
                Err(RecvTimeoutError::Disconnected) => break true,
                Err(RecvTimeoutError::Timeout) => break false,
            }
        };

        match self.reader.take() {
            Some(reader) if closed => {
                if reader.join().is_err() {
                    tracing::warn!("console reader thread panicked");
                }
            }
            Some(_) => {
                tracing::warn!("solver stdout still open after kill, console reader detached")
            }
            None => {}
        }
        tracing::debug!(lines = self.lines_seen, "solver console closed");
    }
}

impl Drop for SolverProcess {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(script: &str, dir: &std::path::Path) -> SolverConfig {
        let path = dir.join("solver.sh");
        fs::write(&path, script).unwrap();
        SolverConfig {
            executable: "/bin/sh".to_string(),
            arguments: vec![path.to_string_lossy().into_owned()],
            working_dir: dir.to_path_buf(),
            settle_time_ms: 50,
            channel_capacity: 2,
            ..SolverConfig::default()
        }
    }

    #[test]
    fn drains_more_lines_than_channel_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let script = "read db\nfor i in 1 2 3 4 5 6 7 8; do echo \"line $i\"; done\n";
        let config = config_for(script, dir.path());

        let mut process = SolverProcess::spawn(&config).unwrap();
        process.send("JUN92d.bs").unwrap();
        process.settle(Duration::from_millis(100));
        process.shutdown();

        assert_eq!(process.lines_seen, 8);
    }

    #[test]
    fn undecodable_bytes_do_not_stop_the_drain() {
        let dir = tempfile::tempdir().unwrap();
        let script = "read db\nprintf 'caf\\351\\n'\necho after\necho more\n";
        let config = config_for(script, dir.path());

        let mut process = SolverProcess::spawn(&config).unwrap();
        process.send("JUN92d.bs").unwrap();
        process.settle(Duration::from_millis(200));
        process.shutdown();

        assert_eq!(process.lines_seen, 3);
    }

    #[test]
    fn shutdown_does_not_wait_for_an_orphaned_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for("read db\nsleep 5\n", dir.path());

        let mut process = SolverProcess::spawn(&config).unwrap();
        process.send("JUN92d.bs").unwrap();
        let started = Instant::now();
        process.shutdown();

        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(process.finished);
    }

    #[test]
    fn shutdown_kills_a_waiting_solver() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for("read db\nread mode\nread never\n", dir.path());

        let mut process = SolverProcess::spawn(&config).unwrap();
        process.send("JUN92d.bs").unwrap();
        process.shutdown();
        process.shutdown();

        assert!(process.finished);
        assert!(process.send("no").is_err());
    }

    #[test]
    fn spawn_failure_names_the_program() {
        let dir = tempfile::tempdir().unwrap();
        let config = SolverConfig {
            executable: "definitely-not-a-solver".to_string(),
            programs_dir: Some(dir.path().to_path_buf()),
            working_dir: dir.path().to_path_buf(),
            ..SolverConfig::default()
        };

        match SolverProcess::spawn(&config) {
            Err(SessionError::Spawn { program, .. }) => {
                assert_eq!(program, dir.path().join("definitely-not-a-solver"))
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("spawn should fail"),
        }
    }
}
