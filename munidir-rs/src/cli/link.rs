//! Link command: encode a search as a shareable query string.

use crate::cli::args::LinkArgs;
use crate::cli::output::Output;
use crate::search::{SearchOptions, to_query_string};

/// Prints `?q=...` relative to the built-in defaults, so the link means the
/// same thing to someone with a different config.
pub fn run(args: &LinkArgs, output: &Output) {
    let options = args.query.apply(SearchOptions::default());
    let encoded = to_query_string(&args.query.query, &options);

    if encoded.is_empty() {
        output.print_raw("?");
    } else {
        output.print_raw(&format!("?{}", encoded));
    }
}
