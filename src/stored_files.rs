//! Stored-files page: filename decoding and the per-file storer fan-out.

use crate::error::RequestResult;
use crate::filter::Searchable;
use crate::gateway::ExplorerApi;
use crate::resolvers::resolve_storers;
use chrono::{Local, NaiveDateTime};
use futures::future::join_all;

const STAMP_LEN: usize = 14;
const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const TITLE_SUFFIX: &str = ".html";

/// Creation time and human title decoded from a stored-file key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileKey {
    pub created: NaiveDateTime,
    pub title: String,
    /// False when the key carried no timestamp and `created` is the decode time.
    pub stamped: bool,
}

impl FileKey {
    pub fn date_time(&self) -> String {
        self.created.format(DISPLAY_FORMAT).to_string()
    }
}

/// Decode `YYYYMMDDHHMMSS<sep?><title>.html`. Keys without a valid leading
/// stamp keep their full name as title and take `now` as creation time.
pub fn parse_file_key(key: &str, now: NaiveDateTime) -> FileKey {
    let stamp = key
        .get(..STAMP_LEN)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| NaiveDateTime::parse_from_str(s, STAMP_FORMAT).ok());

    match stamp {
        Some(created) => {
            let rest = &key[STAMP_LEN..];
            let rest = rest
                .strip_prefix(|c: char| c == '_' || c == '-' || c == ' ')
                .unwrap_or(rest);
            let title = rest.strip_suffix(TITLE_SUFFIX).unwrap_or(rest);
            FileKey {
                created,
                title: title.to_string(),
                stamped: true,
            }
        }
        None => FileKey {
            created: now,
            title: key.to_string(),
            stamped: false,
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFileSummary {
    pub original_name: String,
    pub key: FileKey,
    pub date_time: String,
    pub storers: Vec<String>,
}

impl StoredFileSummary {
    pub fn new(original_name: String, storers: Vec<String>, now: NaiveDateTime) -> Self {
        let key = parse_file_key(&original_name, now);
        let date_time = key.date_time();
        Self {
            original_name,
            key,
            date_time,
            storers,
        }
    }

    pub fn title(&self) -> &str {
        &self.key.title
    }

    pub fn storer_count(&self) -> usize {
        self.storers.len()
    }
}

impl Searchable for StoredFileSummary {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.key.title, &self.date_time]
    }
}

/// List stored files and resolve every file's storers jointly.
///
/// The listing error propagates. A failed storer lookup only empties that
/// file's storer list. Output order is the listing order.
pub async fn resolve_stored_files(api: &dyn ExplorerApi) -> RequestResult<Vec<StoredFileSummary>> {
    let names = api.get_stored_files().await?;
    let now = Local::now().naive_local();

    let storers = join_all(names.iter().map(|name| resolve_storers(api, name))).await;

    let files: Vec<StoredFileSummary> = names
        .into_iter()
        .zip(storers)
        .map(|(name, storers)| StoredFileSummary::new(name, storers, now))
        .collect();
    log::info!("📁 Resolved {} stored files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn stamped_key_decodes_date_and_title() {
        let k = parse_file_key("20230615142233reportA.html", now());
        assert!(k.stamped);
        assert_eq!(k.date_time(), "15/06/2023 14:22:33");
        assert_eq!(k.title, "reportA");
    }

    #[test]
    fn separator_after_stamp_is_dropped() {
        let k = parse_file_key("20230615142233_minutes.html", now());
        assert_eq!(k.title, "minutes");
        let k = parse_file_key("20230615142233-notes", now());
        assert_eq!(k.title, "notes");
    }

    #[test]
    fn unstamped_key_uses_now() {
        let k = parse_file_key("readme.html", now());
        assert!(!k.stamped);
        assert_eq!(k.title, "readme.html");
        assert_eq!(k.date_time(), "02/01/2024 03:04:05");
    }

    #[test]
    fn digits_that_are_not_a_date_are_not_a_stamp() {
        let k = parse_file_key("99999999999999x.html", now());
        assert!(!k.stamped);
        assert_eq!(k.title, "99999999999999x.html");
    }

    #[test]
    fn short_and_multibyte_keys_do_not_panic() {
        assert_eq!(parse_file_key("2023", now()).title, "2023");
        assert_eq!(parse_file_key("ファイル名.html", now()).title, "ファイル名.html");
    }

    #[test]
    fn summary_counts_storers() {
        let s = StoredFileSummary::new(
            "20230615142233reportA.html".into(),
            vec!["a".into(), "b".into()],
            now(),
        );
        assert_eq!(s.storer_count(), 2);
        assert_eq!(s.title(), "reportA");
        assert_eq!(s.date_time, "15/06/2023 14:22:33");
    }
}
