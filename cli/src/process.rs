use crate::progress::Progress;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// A program with its argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;

        for arg in &self.args {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: &str) -> Self {
        Self {
            success: true,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: &str) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Runs external programs to completion
///
/// An `Err` means the process could not be launched, a non-zero exit is reported in the output.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

/// Runs programs as child processes of the CLI
#[derive(Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        log::debug!("Running: {invocation}");

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .inspect_err(|e| log::error!("Can't spawn {}: {e:?}", invocation.program))?;

        let mut process = Process::new(child);
        let status = process.log()?;
        log::debug!("{} exited with {status}", invocation.program);

        Ok(process.output(status))
    }
}

/// A wrapper over system process
///
/// Shows the output on a spinner while the process runs, and collects it for later use.
struct Process {
    child: Child,
    progress: Progress,
    stdout_lines: Arc<Mutex<Vec<String>>>,
    stderr_lines: Arc<Mutex<Vec<String>>>,
}

impl Process {
    fn new(child: Child) -> Self {
        Process {
            child,
            progress: Progress::spinner(),
            stdout_lines: Arc::new(Mutex::new(Vec::new())),
            stderr_lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a thread for showing a line, and accumulating for later full output
    fn thread(
        &self,
        reader: BufReader<impl Read + Send + 'static>,
        lock: Arc<Mutex<Vec<String>>>,
    ) -> JoinHandle<()> {
        let progress = self.progress.clone();

        std::thread::spawn(move || {
            for line in reader.lines().map_while(Result::ok) {
                progress.line(&line);

                if let Ok(mut lines) = lock.lock() {
                    lines.push(line);
                }
            }
        })
    }

    /// Wait for the process, showing its output in one line in real-time
    fn log(&mut self) -> io::Result<ExitStatus> {
        let stdout = self
            .child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("Failed to capture stdout"))?;

        let stderr = self
            .child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("Failed to capture stderr"))?;

        let stdout_thread = self.thread(BufReader::new(stdout), Arc::clone(&self.stdout_lines));
        let stderr_thread = self.thread(BufReader::new(stderr), Arc::clone(&self.stderr_lines));

        let status = self.child.wait();

        // Readers finish once the pipes are closed
        for thread in [stdout_thread, stderr_thread] {
            thread
                .join()
                .map_err(|_| io::Error::other("Output reader thread panicked"))?;
        }

        self.progress.clear();
        status
    }

    fn output(&self, status: ExitStatus) -> CommandOutput {
        let collect = |lock: &Arc<Mutex<Vec<String>>>| {
            lock.lock()
                .map(|lines| {
                    let mut text = lines.join("\n");

                    if !text.is_empty() {
                        text.push('\n');
                    }

                    text
                })
                .unwrap_or_default()
        };

        CommandOutput {
            success: status.success(),
            stdout: collect(&self.stdout_lines),
            stderr: collect(&self.stderr_lines),
        }
    }
}
