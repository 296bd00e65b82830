//! Rectangle test on three quadruples of side lengths
//!
//! Usage:
//! ```bash
//! cargo run -p qdemo_compare --example rectangle
//! ```

use anyhow::Result;
use qdemo_compare::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let comparator = Comparator::simulator(ComparatorConfig::default());

    for (a, b, c, d) in [(5, 6, 6, 5), (50, 72, 72, 60), (7, 7, 3, 2)] {
        let rectangle = comparator.is_rectangle(a, b, c, d)?;
        println!("{}", u8::from(rectangle));
    }

    Ok(())
}
