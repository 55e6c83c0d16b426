//! New command implementation

use std::io;

use crate::cli::NewArgs;
use crate::error::{OutlinerError, Result};
use crate::scene::{sample_project, save_project};

/// Run the new command
pub fn run(args: NewArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(OutlinerError::Io {
            path: args.path,
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "file exists (use --force to overwrite)",
            ),
        });
    }

    let graph = sample_project()?;
    save_project(&args.path, &graph)?;

    tracing::info!(path = %args.path.display(), objects = graph.len(), "Wrote sample project");
    println!("Created {}", args.path.display());

    Ok(())
}
