use crate::errors::Result;

/// `gt <version> (<os>/<arch>)`
fn version_line() -> String {
    format!(
        "gt {} ({}/{})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Show version information
pub async fn run() -> Result<()> {
    println!("{}", version_line());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        let line = version_line();
        assert!(line.starts_with(&format!("gt {} (", env!("CARGO_PKG_VERSION"))));
        assert!(line.contains(std::env::consts::OS));
    }
}
