// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use vergen::EmitBuilder;

// Embeds VERGEN_GIT_SHA and VERGEN_GIT_COMMIT_DATE for `scribe version`.
// Outside a git checkout vergen emits nothing and the version string omits them.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    EmitBuilder::builder()
        .git_sha(false)
        .git_commit_date()
        .emit()?;
    Ok(())
}
