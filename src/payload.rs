use anyhow::Context as _;
use scraper::{Html, Selector};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::SERVICE_SUBJECT;
use crate::records::{
    Book, Fullpage, InitialUpdateJson, LicenceKey, UpdateJsonMessage, UserUpdateStatus,
};
use crate::tables::Table;

/// How an input file should be interpreted before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputType {
    /// An HTML document to convert into a fullpage record.
    Html,
    /// A JSON record of the target table's shape.
    Json,
    /// A free-form update message to wrap into an initialupdatejson record.
    Updatejson,
}

/// Turns one raw input into the canonical JSON payload for `table`.
///
/// `id` is the identifier derived from the input filename; variants whose
/// records carry their own id ignore it.
pub fn transform(
    table: Table,
    intype: InputType,
    id: &str,
    raw: &[u8],
) -> anyhow::Result<Vec<u8>> {
    match (intype, table) {
        (InputType::Html, Table::Fullpage) => {
            let html = std::str::from_utf8(raw).context("fullpage html is not utf-8")?;
            let page = fullpage_from_html(id, html)?;
            serde_json::to_vec(&page).context("serialize fullpage")
        }
        (InputType::Json, Table::Fullpage) => roundtrip::<Fullpage>(raw, "fullpage"),
        (InputType::Json, Table::Book) => roundtrip::<Book>(raw, "book"),
        (InputType::Json, Table::Licencekey) => roundtrip::<LicenceKey>(raw, "licence key"),
        (InputType::Json, Table::Initialupdatejson) => {
            roundtrip::<InitialUpdateJson>(raw, "initial update json")
        }
        (InputType::Json, Table::Userupdatestatus) => {
            let status = update_status_from_message(raw)?;
            serde_json::to_vec(&status).context("serialize user update status")
        }
        (InputType::Updatejson, Table::Initialupdatejson) => {
            let item = initial_update_from_message(id, raw)?;
            serde_json::to_vec(&item).context("serialize initial update json")
        }
        (intype, table) => {
            anyhow::bail!("input type {intype:?} is not supported for table {table:?}")
        }
    }
}

/// Builds a fullpage record from an HTML document: the title is the text of
/// the first `<title>` element in document order (empty when absent) and the
/// raw markup is kept verbatim as the content.
pub fn fullpage_from_html(id: &str, html: &str) -> anyhow::Result<Fullpage> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("title")
        .map_err(|err| anyhow::anyhow!("build title selector: {err}"))?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default();

    Ok(Fullpage {
        id: id.to_owned(),
        title,
        content: html.to_owned(),
    })
}

/// Decode-then-encode pass; a schema mismatch fails here, before any upload.
fn roundtrip<T>(raw: &[u8], what: &str) -> anyhow::Result<Vec<u8>>
where
    T: DeserializeOwned + Serialize,
{
    let record: T =
        serde_json::from_slice(raw).with_context(|| format!("decode {what} json"))?;
    serde_json::to_vec(&record).with_context(|| format!("serialize {what}"))
}

/// Wraps a decoded update message as the payload of a status record owned by
/// the service identity.
fn update_status_from_message(raw: &[u8]) -> anyhow::Result<UserUpdateStatus> {
    let message: UpdateJsonMessage =
        serde_json::from_slice(raw).context("decode update message json")?;
    let update_json =
        serde_json::to_string(&message).context("re-encode update message")?;

    Ok(UserUpdateStatus {
        id: SERVICE_SUBJECT.to_owned(),
        update_needed: false,
        update_json,
    })
}

fn initial_update_from_message(id: &str, raw: &[u8]) -> anyhow::Result<InitialUpdateJson> {
    let message: UpdateJsonMessage =
        serde_json::from_slice(raw).context("decode update message json")?;
    let update_json =
        serde_json::to_string(&message).context("re-encode update message")?;

    Ok(InitialUpdateJson {
        id: id.to_owned(),
        update_json,
    })
}
