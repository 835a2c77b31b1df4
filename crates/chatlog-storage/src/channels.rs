//! Exported channel list

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// One entry of `channels.json`. Columns other than `name` and `follower`
/// are kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub follower: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Load `channels.json`; the top level must be an array
pub fn load_channels(path: &Path) -> Result<Vec<ChannelRecord>> {
    let content = fs::read_to_string(path)?;
    let channels: Vec<ChannelRecord> = serde_json::from_str(&content)?;
    Ok(channels)
}

/// Stable ascending sort by follower count
pub fn sort_by_follower(channels: &mut [ChannelRecord]) {
    channels.sort_by_key(|channel| channel.follower);
}

/// Write exported rows as pretty-printed JSON
pub fn write_channels_json(path: &Path, rows: &[Map<String, Value>]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    serde_json::to_writer_pretty(&mut file, rows)?;
    file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_sort() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("channels.json");
        fs::write(
            &path,
            r#"[
                {"name": "big", "follower": 9000, "channelId": "a"},
                {"name": "none"},
                {"name": "small", "follower": 10},
                {"name": "tie", "follower": 10}
            ]"#,
        )
        .unwrap();

        let mut channels = load_channels(&path).unwrap();
        sort_by_follower(&mut channels);

        let names: Vec<_> = channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["none", "small", "tie", "big"]);
        assert_eq!(channels[3].extra["channelId"], "a");
    }

    #[test]
    fn test_load_rejects_non_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("channels.json");
        fs::write(&path, r#"{"name": "x"}"#).unwrap();

        assert!(load_channels(&path).is_err());
    }

    #[test]
    fn test_write_preserves_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/channels.json");

        let mut row = Map::new();
        row.insert("name".to_string(), Value::from("치지직"));
        row.insert("follower".to_string(), Value::from(3));
        write_channels_json(&path, &[row]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("치지직"));

        let channels = load_channels(&path).unwrap();
        assert_eq!(channels[0].follower, 3);
    }
}
