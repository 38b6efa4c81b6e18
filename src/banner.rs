//! Banner and branding for the SITESMITH CLI

use console::{style, Term};

/// Display the SITESMITH banner
pub fn display_banner() {
    let term = Term::stderr();
    let version = env!("CARGO_PKG_VERSION");

    let banner = format!(
        r#"
 ███████╗██╗████████╗███████╗███████╗███╗   ███╗██╗████████╗██╗  ██╗
 ██╔════╝██║╚══██╔══╝██╔════╝██╔════╝████╗ ████║██║╚══██╔══╝██║  ██║
 ███████╗██║   ██║   █████╗  ███████╗██╔████╔██║██║   ██║   ███████║
 ╚════██║██║   ██║   ██╔══╝  ╚════██║██║╚██╔╝██║██║   ██║   ██╔══██║
 ███████║██║   ██║   ███████╗███████║██║ ╚═╝ ██║██║   ██║   ██║  ██║
 ╚══════╝╚═╝   ╚═╝   ╚══════╝╚══════╝╚═╝     ╚═╝╚═╝   ╚═╝   ╚═╝  ╚═╝
                    Prompt-to-Website Generator v{}
"#,
        version
    );

    let _ = term.write_line(&style(banner).cyan().to_string());
    let _ = term.write_line(&style("=".repeat(72)).dim().to_string());
    let _ = term.write_line("");
}

/// Display minimal banner (for quiet mode)
pub fn display_minimal_banner() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "{}",
        style(format!("SITESMITH v{} - Prompt-to-Website Generator", version))
            .cyan()
            .bold()
    );
    eprintln!("{}", style("=".repeat(72)).dim());
}
