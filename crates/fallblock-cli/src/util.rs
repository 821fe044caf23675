use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use fallblock_engine::BoardConfig;

pub(crate) fn read_board_config_file(path: &Path) -> anyhow::Result<BoardConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open board config file: {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse board config file: {}", path.display()))?;
    Ok(config)
}
