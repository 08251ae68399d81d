use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::ExtractArgs;
use crate::records::{AppLog, ListResponse};
use crate::tables::Table;
use crate::transport::ApiClient;

/// Cursor state for one paginated table walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub top: u64,
    pub skip: u64,
    pub running_count: u64,
}

impl PageCursor {
    pub fn new(top: u64) -> Self {
        Self {
            top,
            skip: 0,
            running_count: 0,
        }
    }

    /// Query string for the page currently pointed at.
    pub fn page_query(&self) -> String {
        format!("$top={}&$skip={}&$inlinecount=allpages", self.top, self.skip)
    }

    /// Advances past the page just fetched; returns whether another page
    /// should be requested. The running count moves by the requested page
    /// size, not the returned row count, so a partial final page over-counts.
    pub fn advance(&mut self, server_count: u64) -> bool {
        self.running_count += self.top;
        if self.running_count > server_count {
            return false;
        }
        self.skip += self.top;
        true
    }
}

/// Walks the whole table page by page and writes one CSV row per record,
/// fields `[userID, logDateTime, logName, logDataJson]`, no header.
pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    if args.table != Table::Applog {
        anyhow::bail!("extraction currently supports only the applog table");
    }

    let out_path = PathBuf::from(&args.out);
    let out_file = File::create(&out_path)
        .with_context(|| format!("create output file: {}", out_path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out_file);

    let url = args.table.item_url(&args.url)?;
    let token = crate::auth::mint_token(Path::new(&args.keyfile)).context("mint auth token")?;
    let client = ApiClient::new(token).context("build api client")?;

    tracing::info!(url = %url, out = %out_path.display(), "starting extraction");

    let mut cursor = PageCursor::new(args.page_size);
    let mut records: Vec<AppLog> = Vec::new();

    loop {
        let mut page_url = url.clone();
        page_url.set_query(Some(&cursor.page_query()));

        let body = client.get(page_url)?;
        let page: ListResponse<AppLog> =
            serde_json::from_slice(&body).context("decode list response")?;

        for row in &page.results {
            writer
                .write_record([
                    row.user_id.as_str(),
                    row.log_date_time.as_str(),
                    row.log_name.as_str(),
                    row.log_data_json.as_str(),
                ])
                .context("write csv row")?;
        }
        records.extend(page.results);

        tracing::info!(
            skip = cursor.skip,
            fetched = records.len(),
            server_count = page.count,
            "page extracted"
        );

        if !cursor.advance(page.count) {
            break;
        }
    }

    writer.flush().context("flush csv output")?;
    tracing::info!(total = records.len(), out = %out_path.display(), "extraction finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_walks_three_pages_for_120_records_at_page_size_50() {
        let mut cursor = PageCursor::new(50);
        let mut offsets = Vec::new();
        let mut running = Vec::new();

        loop {
            offsets.push(cursor.skip);
            let more = cursor.advance(120);
            running.push(cursor.running_count);
            if !more {
                break;
            }
        }

        assert_eq!(offsets, vec![0, 50, 100]);
        assert_eq!(running, vec![50, 100, 150]);
    }

    #[test]
    fn cursor_stops_immediately_on_an_empty_table() {
        let mut cursor = PageCursor::new(50);
        assert!(!cursor.advance(0));
        assert_eq!(cursor.skip, 0);
    }

    #[test]
    fn cursor_fetches_one_extra_page_when_count_is_an_exact_multiple() {
        // 100 records at page size 50: the running count reaches 100 after
        // the second page, which is not > 100, so a third (empty) page is
        // still requested.
        let mut cursor = PageCursor::new(50);
        assert!(cursor.advance(100));
        assert!(cursor.advance(100));
        assert!(!cursor.advance(100));
        assert_eq!(cursor.skip, 100);
    }

    #[test]
    fn page_query_carries_top_skip_and_inlinecount() {
        let mut cursor = PageCursor::new(50);
        assert_eq!(cursor.page_query(), "$top=50&$skip=0&$inlinecount=allpages");
        cursor.advance(500);
        assert_eq!(cursor.page_query(), "$top=50&$skip=50&$inlinecount=allpages");
    }
}
