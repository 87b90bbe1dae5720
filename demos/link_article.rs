//! Links keywords in an article and strips the links again
//!
//! Usage: `cargo run --example link_article -- [article.html]`
//! Set `RUST_LOG=link_nest=trace` to see every rejected candidate.

use std::{env, fs};

use link_nest::{Keyword, Settings, TextProcessor, strip_links};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "<h2>Online marketing services</h2>\n\
<p>Vestibulum sem neque, vehicula in dolor non, hendrerit maximus tellus. \
Our <a href=\"/contact/\">online marketing</a> team offers a free seo audit.</p>";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let article = env::args()
        .nth(1)
        .and_then(|path| fs::read_to_string(path).ok())
        .unwrap_or_else(|| SAMPLE.to_string());

    let keywords = vec![
        Keyword::new("non", "online marketing", "help", "https://linking.objav.digital/services/"),
        Keyword::new("maximus", "ifocus agency", "help", "https://linking.objav.digital/about/"),
        Keyword::new("online marketing", "services", "help", "https://linking.objav.digital/"),
        Keyword::new("seo audit", "seo audit", "help", "https://linking.objav.digital/services/seo-audit/"),
    ];
    let settings = Settings::default().with_max_links(0);

    let mut processor = TextProcessor::new(settings, keywords);
    let linked = processor.process(&article);

    println!("=== linked ({} replacements) ===", processor.replacements());
    println!("{linked}\n");

    let restored = strip_links(&linked);
    println!("=== stripped ===");
    println!("{restored}\n");
    println!("round trip intact: {}", restored == article);
}
