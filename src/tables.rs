use anyhow::Context as _;
use url::Url;

/// Remote table endpoints. The set is closed: adding a table means adding a
/// variant and its URL suffix here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Table {
    Fullpage,
    Book,
    Licencekey,
    Userupdatestatus,
    Initialupdatejson,
    Applog,
}

impl Table {
    pub fn path_suffix(self) -> &'static str {
        match self {
            Table::Fullpage => "tables/fullpageitem/",
            Table::Book => "tables/bookitem/",
            Table::Licencekey => "tables/licencekeyitem/",
            Table::Userupdatestatus => "tables/userupdatestatusitem/",
            Table::Initialupdatejson => "tables/initialupdatejsonitem/",
            Table::Applog => "tables/AppLogItem/",
        }
    }

    /// Resolves the table item URL against the backend base URL.
    pub fn item_url(self, base: &str) -> anyhow::Result<Url> {
        let mut base_url =
            Url::parse(base).with_context(|| format!("parse base url: {base}"))?;

        // Joining treats the last path segment as a file unless it ends in a
        // slash, so normalize the base path first.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        base_url
            .join(self.path_suffix())
            .with_context(|| format!("resolve table url for {:?}", self))
    }
}
