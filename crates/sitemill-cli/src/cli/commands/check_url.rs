//! `sitemill check-url` – base-URL prefix check.

use sitemill_core::is_under_base;

/// Prints the verdict and returns it.
pub fn run_check_url(base: &str, candidate: &str) -> bool {
    let under = is_under_base(base, candidate);
    if under {
        println!("{candidate} is under {base}");
    } else {
        println!("{candidate} is NOT under {base}");
    }
    under
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts() {
        assert!(run_check_url("http://a.com/dir/", "http://a.com/dir/page"));
        assert!(!run_check_url("http://a.com/dir/", "http://a.com/other"));
        assert!(!run_check_url("", "http://a.com/"));
    }
}
