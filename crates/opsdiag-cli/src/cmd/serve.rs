use std::path::{Path, PathBuf};

pub fn run(root: &Path, doc: Option<PathBuf>, port: u16, no_open: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(opsdiag_server::serve(
        root.to_path_buf(),
        doc,
        port,
        !no_open,
    ))
}
