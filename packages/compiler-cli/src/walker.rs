//! Directory walker
//!
//! Recursively finds template files under a directory and writes the
//! generated PHP next to each one. Files whose output is already newer
//! than the template are skipped.

use crate::config::PhpxConfig;
use crate::logger::Logger;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Walker {
    config: PhpxConfig,
    logger: Logger,
}

impl Walker {
    pub fn new(config: PhpxConfig, logger: Logger) -> Self {
        Walker { config, logger }
    }

    /// Compiles every template under `dir` and returns the number of
    /// templates that failed.
    pub fn walk(&self, dir: &Path) -> anyhow::Result<usize> {
        let mut files = Vec::new();
        self.collect(dir, &mut files)?;

        let failures = files
            .par_iter()
            .map(|file| usize::from(!self.compile(file)))
            .sum();

        Ok(failures)
    }

    fn collect(&self, dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
        let pattern = format!("{}/*", dir.display());

        for entry in glob::glob(&pattern)? {
            let path = entry?;

            if path.is_dir() {
                self.collect(&path, files)?;
            } else if path.extension().and_then(|extension| extension.to_str())
                == Some(self.config.extension_in.as_str())
            {
                files.push(path);
            }
        }

        Ok(())
    }

    fn compile(&self, input: &Path) -> bool {
        match self.try_compile(input) {
            Ok(()) => true,
            Err(error) => {
                self.logger
                    .error(&format!("{error:#}\n> file: {}", input.display()));
                false
            }
        }
    }

    fn try_compile(&self, input: &Path) -> anyhow::Result<()> {
        let output = input.with_extension(&self.config.extension_out);

        if self.is_up_to_date(input, &output) {
            self.logger
                .info(&format!("{} is up to date", input.display()));
            return Ok(());
        }

        let template = fs::read_to_string(input)?;

        if template.trim().is_empty() {
            fs::write(&output, "")?;
            self.logger
                .warn(&format!("{} 🚧 {}", input.display(), output.display()));
            return Ok(());
        }

        let php = phpx_compiler::transpile(&template)?;
        fs::write(&output, php)?;
        self.logger
            .success(&format!("{} ✨ {}", input.display(), output.display()));

        Ok(())
    }

    fn is_up_to_date(&self, input: &Path, output: &Path) -> bool {
        let (Ok(input_meta), Ok(output_meta)) = (fs::metadata(input), fs::metadata(output)) else {
            return false;
        };

        match (input_meta.modified(), output_meta.modified()) {
            (Ok(input_time), Ok(output_time)) => output_time > input_time,
            _ => false,
        }
    }
}
