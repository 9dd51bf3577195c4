//! External shape compiler integration.
//!
//! Some shapes are authored as vector scripts and compiled to SVG by an
//! external tool. The store only depends on the [`ShapeCompiler`] trait, so
//! ingestion logic stays testable with an in-process fake; the subprocess
//! details live in [`IconScriptCompiler`].

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Compiles a vector script into a directory of per-shape SVG files.
///
/// Output files follow the `<id>_<version>.svg` naming convention; see
/// [`crate::shape::ShapeStore::add_from_script`].
pub trait ShapeCompiler {
    /// Compiles `script` and returns the directory containing the output.
    fn compile(&self, script: &Path) -> Result<PathBuf>;
}

/// Runs the `iconscript` compiler as a subprocess.
///
/// The compiler is invoked as `<binary> <script> --output <directory>` and
/// must exit within [`IconScriptCompiler::timeout`]. A missing binary, a
/// non-zero exit code, and a timeout are all hard errors: there is no
/// fallback rendering path for script-sourced shapes.
pub struct IconScriptCompiler {
    /// Path to the compiler executable.
    pub binary: PathBuf,

    /// Directory the compiler writes its SVG output into.
    pub output_directory: PathBuf,

    /// Wall-clock limit for one compiler run.
    pub timeout: Duration,
}

impl IconScriptCompiler {
    pub fn new(binary: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            output_directory: output_directory.into(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl ShapeCompiler for IconScriptCompiler {
    fn compile(&self, script: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_directory)?;

        let mut child = Command::new(&self.binary)
            .arg(script)
            .arg("--output")
            .arg(&self.output_directory)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| {
                if error.kind() == std::io::ErrorKind::NotFound {
                    Error::CompilerNotFound {
                        path: self.binary.clone(),
                    }
                } else {
                    Error::Io(error)
                }
            })?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                child.kill()?;
                child.wait()?;
                return Err(Error::Compiler {
                    message: format!(
                        "`{}` timed out after {:?} on {}",
                        self.binary.display(),
                        self.timeout,
                        script.display()
                    ),
                });
            }
            std::thread::sleep(Duration::from_millis(20));
        };

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                use std::io::Read as _;
                let _ = pipe.read_to_string(&mut stderr);
            }
            return Err(Error::Compiler {
                message: format!(
                    "`{}` exited with {status} on {}: {}",
                    self.binary.display(),
                    script.display(),
                    stderr.trim()
                ),
            });
        }

        Ok(self.output_directory.clone())
    }
}
