// src/config/cli_conversion.rs

use super::{validation::ensure_destination, SyncConfig, SyncConfigBuilder};
use crate::cli::UpdateArgs;
use crate::errors::SyncError;
use std::time::Duration;

impl TryFrom<UpdateArgs> for SyncConfig {
    type Error = SyncError;

    /// Builds the configuration and prepares the destination path.
    ///
    /// The destination is only touched after every other option validated.
    fn try_from(args: UpdateArgs) -> Result<Self, Self::Error> {
        let config = SyncConfigBuilder::new()
            .target(args.path)
            .repo_url(args.repo)
            .branch(args.branch)
            .sparse_dir(args.dir)
            .cleanup(args.cleanup)
            .token(args.github_token)
            .api_base_url(args.api_url)
            .timeout((args.timeout > 0).then(|| Duration::from_secs(args.timeout)))
            .marker_file(args.marker)
            .build()?;

        ensure_destination(&config.target)?;
        Ok(config)
    }
}
