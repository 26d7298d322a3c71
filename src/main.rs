//! # Zebrita pipe
//!
//! A pure stdin→stdout label run: reads one base64-encoded EPL blob from
//! stdin, writes the base64-encoded single-page document to stdout, and
//! reports diagnostics on stderr. No flags, no configuration, no state.
//!
//! ```bash
//! base64 label.epl | zebrita > label.png.b64
//! ```

use std::io::{Read, Write};

use zebrita::{ZebritaError, render_label};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ZebritaError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = render_label(&input).await?;

    for diagnostic in &output.diagnostics {
        eprintln!("{}", diagnostic);
    }

    let mut stdout = std::io::stdout();
    stdout.write_all(output.document.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;

    Ok(())
}
