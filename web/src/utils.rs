use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

impl Args {
    /// Arguments are read from the location hash, e.g. `#-vv&--seed=42`.
    pub(crate) fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    /// Like [`Args::from_hash`], but unusable arguments fall back to the defaults. The parse error
    /// is handed back so it can be logged once a logger exists.
    pub(crate) fn from_hash_or_default(hash: &str) -> (Self, Option<clap::Error>) {
        match Self::from_hash(hash) {
            Ok(args) => (args, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub(crate) fn from_location() -> (Self, Option<clap::Error>) {
        let location_hash = gloo::utils::window()
            .location()
            .hash()
            .unwrap_or_else(|_| "".to_string());
        Self::from_hash_or_default(&location_hash)
    }
}

/// Inner size of the browser window, if it can be read.
pub(crate) fn window_size() -> Option<(f64, f64)> {
    let window = gloo::utils::window();
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
