use crate::{Error, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// An external renderer that lays out a DOT graph and returns it as SVG.
pub trait LayoutEngine: Send + Sync {
    fn render_svg(&self, dot: &str) -> Result<String>;
}

impl<F> LayoutEngine for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn render_svg(&self, dot: &str) -> Result<String> {
        self(dot)
    }
}

/// Runs a Graphviz-compatible executable (`dot -Tsvg` by default), DOT on stdin, SVG on stdout.
#[derive(Debug, Clone)]
pub struct GraphvizCli {
    program: PathBuf,
    layout: Option<String>,
}

impl Default for GraphvizCli {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl GraphvizCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            layout: None,
        }
    }

    /// Selects a layout engine (`-K<name>`), e.g. `neato` or `fdp`.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    fn failure(&self, message: impl Into<String>) -> Error {
        Error::LayoutEngine {
            program: self.program.display().to_string(),
            message: message.into(),
        }
    }
}

impl LayoutEngine for GraphvizCli {
    fn render_svg(&self, dot: &str) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-Tsvg");
        if let Some(layout) = &self.layout {
            cmd.arg(format!("-K{layout}"));
        }
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failure("stdin is not piped"))?;
        let input = dot.to_owned();
        // Feed stdin from another thread so a large SVG cannot fill stdout while we block.
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!("{}: {}", output.status, stderr.trim())));
        }
        match writer.join() {
            Ok(written) => written?,
            Err(_) => return Err(self.failure("stdin writer panicked")),
        }

        tracing::debug!(
            program = %self.program.display(),
            bytes = output.stdout.len(),
            "layout engine rendered SVG"
        );
        String::from_utf8(output.stdout).map_err(|e| self.failure(format!("non UTF-8 output: {e}")))
    }
}
