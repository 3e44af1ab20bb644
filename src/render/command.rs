//! Renderer that shells out to an external HTML rasterizer.

use super::{Renderer, Surface};
use crate::error::{Error, Result};
use crate::model::SourceImage;
use std::fs;
use std::process::Command;

/// Default rasterizer program.
pub const DEFAULT_PROGRAM: &str = "wkhtmltoimage";

/// Runs an external program that turns an HTML file into a PNG.
///
/// Arguments may contain the placeholders `{input}`, `{output}`,
/// `{width}` and `{zoom}`, substituted per render.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Create a renderer for `program` with argument templates.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `wkhtmltoimage --quiet --format png --width {width} --zoom {zoom} {input} {output}`
    pub fn wkhtmltoimage() -> Self {
        let args = [
            "--quiet", "--format", "png", "--width", "{width}", "--zoom", "{zoom}", "{input}",
            "{output}",
        ];
        Self::new(
            DEFAULT_PROGRAM,
            args.iter().map(|a| a.to_string()).collect(),
        )
    }

    /// Parse a command line such as `"chromium --headless --screenshot={output} {input}"`.
    ///
    /// Arguments are split on whitespace; quoting is not supported.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::Render("renderer command is empty".to_string()))?;
        Ok(Self::new(program, parts.map(str::to_string).collect()))
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn expand_args(&self, input: &str, output: &str, surface: &Surface) -> Vec<String> {
        let width = surface.width_px.to_string();
        let zoom = surface.scale.to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{input}", input)
                    .replace("{output}", output)
                    .replace("{width}", &width)
                    .replace("{zoom}", &zoom)
            })
            .collect()
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::wkhtmltoimage()
    }
}

impl Renderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.program
    }

    fn render(&self, surface: &Surface) -> Result<SourceImage> {
        let workdir = tempfile::Builder::new().prefix("tripdoc-").tempdir()?;
        let input = workdir.path().join("surface.html");
        let output = workdir.path().join("surface.png");
        fs::write(&input, &surface.markup)?;

        let args = self.expand_args(
            &input.to_string_lossy(),
            &output.to_string_lossy(),
            surface,
        );
        log::debug!("running {} {}", self.program, args.join(" "));

        let result = Command::new(&self.program).args(&args).output().map_err(|e| {
            Error::Render(format!("failed to start {}: {}", self.program, e))
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Render(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        if !output.exists() {
            return Err(Error::Render(format!(
                "{} did not produce an image",
                self.program
            )));
        }

        SourceImage::open(&output)
            .map_err(|e| Error::Render(format!("unreadable output from {}: {}", self.program, e)))
    }
}
