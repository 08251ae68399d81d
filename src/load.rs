use std::path::{Path, PathBuf};

use anyhow::Context as _;
use url::Url;

use crate::cli::LoadArgs;
use crate::payload::InputType;
use crate::tables::Table;
use crate::transport::ApiClient;

pub fn run(args: LoadArgs) -> anyhow::Result<()> {
    let input = PathBuf::from(&args.input);
    let metadata = std::fs::metadata(&input)
        .with_context(|| format!("input path is not readable: {}", input.display()))?;

    let url = args.table.item_url(&args.url)?;
    let token = crate::auth::mint_token(Path::new(&args.keyfile)).context("mint auth token")?;
    let client = ApiClient::new(token).context("build api client")?;

    tracing::info!(
        table = ?args.table,
        url = %url,
        input = %input.display(),
        "starting load"
    );

    if metadata.is_dir() {
        load_directory(
            &client,
            &url,
            args.table,
            args.intype,
            &input,
            args.continue_on_error,
        )
    } else {
        load_file(&client, &url, args.table, args.intype, &input)
    }
}

/// Uploads every file in `dir`, one create request per file. Iteration order
/// is whatever the directory listing yields. Under the default policy the
/// first failure aborts the rest of the batch; nothing already uploaded is
/// rolled back.
fn load_directory(
    client: &ApiClient,
    url: &Url,
    table: Table,
    intype: InputType,
    dir: &Path,
    continue_on_error: bool,
) -> anyhow::Result<()> {
    let mut loaded = 0usize;
    let mut failed = 0usize;

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("read input dir: {}", dir.display()))?
    {
        let entry = entry.context("read input dir entry")?;
        let path = entry.path();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }

        match load_file(client, url, table, intype, &path) {
            Ok(()) => loaded += 1,
            Err(err) if continue_on_error => {
                failed += 1;
                tracing::warn!(file = %path.display(), ?err, "load failed; continuing");
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(loaded, failed, "directory load finished");
    Ok(())
}

fn load_file(
    client: &ApiClient,
    url: &Url,
    table: Table,
    intype: InputType,
    path: &Path,
) -> anyhow::Result<()> {
    let id = record_id_from_path(path);
    let raw =
        std::fs::read(path).with_context(|| format!("read input file: {}", path.display()))?;

    let payload = crate::payload::transform(table, intype, &id, &raw)
        .with_context(|| format!("transform {}", path.display()))?;

    client
        .post(url.clone(), payload)
        .with_context(|| format!("upload {}", path.display()))?;

    tracing::info!(file = %path.display(), id = %id, "loaded");
    Ok(())
}

/// Record identifier for a load input: the filename with its extension
/// stripped, whatever the extension's length.
pub fn record_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
