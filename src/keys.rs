use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cli::{KeysExportArgs, KeysMintArgs};
use crate::records::LicenceKey;
use crate::tables::Table;
use crate::transport::ApiClient;

const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Samples a lowercase alphanumeric key of length `n`, one independent draw
/// per character. No uniqueness check is made; collisions are accepted as
/// negligible at the lengths and volumes in use.
pub fn generate_key<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    (0..n)
        .map(|_| {
            let index = rng.random_range(0..KEY_ALPHABET.len());
            KEY_ALPHABET[index] as char
        })
        .collect()
}

/// Mints `count` licence key records with fresh random ids and uploads each
/// one. The rng is seeded once here and owned for the whole run.
pub fn mint(args: KeysMintArgs) -> anyhow::Result<()> {
    let url = Table::Licencekey.item_url(&args.url)?;
    let token = crate::auth::mint_token(Path::new(&args.keyfile)).context("mint auth token")?;
    let client = ApiClient::new(token).context("build api client")?;
    let mut rng = StdRng::from_os_rng();

    tracing::info!(
        count = args.count,
        length = args.length,
        handbook_type = %args.handbook_type,
        url = %url,
        "minting licence keys"
    );

    for _ in 0..args.count {
        let key = LicenceKey {
            id: generate_key(&mut rng, args.length),
            handbook_type: args.handbook_type.clone(),
            user_id: String::new(),
        };

        let payload = serde_json::to_vec(&key).context("serialize licence key")?;
        client
            .post(url.clone(), payload)
            .with_context(|| format!("upload licence key {}", key.id))?;

        tracing::debug!(id = %key.id, "licence key uploaded");
    }

    Ok(())
}

/// Converts a local licence-key JSON dump into pipe-delimited text, one
/// `id|handbookType|userID` line per record, and prints the resolved output
/// path followed by the record count.
pub fn export(args: KeysExportArgs) -> anyhow::Result<()> {
    let input = PathBuf::from(&args.input);
    let out_path = match args.out {
        Some(out) => PathBuf::from(out),
        None => {
            let mut os = input.clone().into_os_string();
            os.push(".txt");
            PathBuf::from(os)
        }
    };
    println!("{}", out_path.display());

    let in_file = File::open(&input)
        .with_context(|| format!("open licence key dump: {}", input.display()))?;
    let keys: Vec<LicenceKey> = serde_json::from_reader(BufReader::new(in_file))
        .context("decode licence key dump")?;

    let out_file = File::create(&out_path)
        .with_context(|| format!("create output file: {}", out_path.display()))?;
    let mut out = BufWriter::new(out_file);

    for key in &keys {
        writeln!(out, "{}|{}|{}", key.id, key.handbook_type, key.user_id)
            .with_context(|| format!("write output file: {}", out_path.display()))?;
    }
    out.flush()
        .with_context(|| format!("flush output file: {}", out_path.display()))?;

    tracing::info!(count = keys.len(), out = %out_path.display(), "licence keys exported");
    println!("{}", keys.len());
    Ok(())
}
