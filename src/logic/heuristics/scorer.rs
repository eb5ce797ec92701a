//! Heuristic Scorer
//!
//! Stateless rule evaluation. Each check is computed independently;
//! parse failures yield the conservative default for that check only.
//! Input: raw URL + page URL. Output: CheckResult.

use crate::logic::urlinfo;

use super::rules::{
    DANGEROUS_BELOW, KEYWORD_PENALTY_CAP, PENALTY_AT_SIGN, PENALTY_EXTERNAL, PENALTY_HTTP,
    PENALTY_IP_HOST, PENALTY_LONG_URL, PENALTY_PER_KEYWORD, PENALTY_PUNYCODE, PENALTY_SUSP_TLD,
    SUSPICIOUS_BELOW, SUSPICIOUS_KEYWORDS, SUSPICIOUS_TLDS, SUSPICIOUS_URL_LENGTH,
};
use super::types::CheckResult;

// ============================================================================
// EVALUATION
// ============================================================================

/// Run every check against the candidate URL and derive the score.
///
/// Host-based checks see the URL as-is (no scheme prefixing): an
/// unparsable URL simply has no hostname signal. The external check
/// resolves the candidate against the page URL and fails toward
/// suspicion when either side does not parse.
pub fn evaluate(url: &str, page_url: &str) -> CheckResult {
    let host = urlinfo::hostname(url);
    let host = host.as_deref().unwrap_or("");

    let mut checks = CheckResult {
        is_ip: urlinfo::is_ipv4(host),
        punycode: urlinfo::is_punycode(host) && !host.is_empty(),
        has_at: url.contains('@'),
        suspicious_length: url.chars().count() > SUSPICIOUS_URL_LENGTH,
        http: urlinfo::parse(url).map(|u| u.scheme() == "http").unwrap_or(false),
        external: urlinfo::is_external(page_url, url),
        susp_keywords: matched_keywords(url),
        susp_tld: !host.is_empty()
            && SUSPICIOUS_TLDS.contains(&urlinfo::top_level_label(host).as_str()),
        score: 100,
    };

    checks.score = score_from_checks(&checks);
    checks
}

/// Additive penalty model: start at 100, subtract per positive flag,
/// clamp to [0, 100].
pub fn score_from_checks(checks: &CheckResult) -> u8 {
    let mut score: i32 = 100;

    if checks.is_ip {
        score -= PENALTY_IP_HOST;
    }
    if checks.punycode {
        score -= PENALTY_PUNYCODE;
    }
    if checks.has_at {
        score -= PENALTY_AT_SIGN;
    }
    if checks.http {
        score -= PENALTY_HTTP;
    }
    if checks.suspicious_length {
        score -= PENALTY_LONG_URL;
    }
    if checks.external {
        score -= PENALTY_EXTERNAL;
    }
    if !checks.susp_keywords.is_empty() {
        score -= KEYWORD_PENALTY_CAP
            .min(PENALTY_PER_KEYWORD * checks.susp_keywords.len() as i32);
    }
    if checks.susp_tld {
        score -= PENALTY_SUSP_TLD;
    }

    score.clamp(0, 100) as u8
}

/// Keywords from the heuristic list present in the lower-cased URL,
/// in list order.
fn matched_keywords(url: &str) -> Vec<String> {
    let lower = url.to_lowercase();
    SUSPICIOUS_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

/// One human-readable sentence per positive flag, in fixed order.
pub fn reasons(checks: &CheckResult) -> Vec<String> {
    let mut reasons = Vec::new();

    if checks.is_ip {
        reasons.push("Link uses IP address.".to_string());
    }
    if checks.punycode {
        reasons.push("Domain uses punycode.".to_string());
    }
    if checks.has_at {
        reasons.push("Contains \"@\" in URL.".to_string());
    }
    if checks.http {
        reasons.push("Uses HTTP (not encrypted).".to_string());
    }
    if checks.suspicious_length {
        reasons.push("Very long URL.".to_string());
    }
    if checks.external {
        reasons.push("External domain link.".to_string());
    }
    if !checks.susp_keywords.is_empty() {
        reasons.push(format!(
            "Suspicious keywords: {}",
            checks.susp_keywords.join(", ")
        ));
    }
    if checks.susp_tld {
        reasons.push("Suspicious TLD.".to_string());
    }

    reasons
}

/// Level thresholds over the penalty score
pub fn level_for_score(score: u8) -> crate::logic::engine::RiskLevel {
    use crate::logic::engine::RiskLevel;

    if score < DANGEROUS_BELOW {
        RiskLevel::Dangerous
    } else if score < SUSPICIOUS_BELOW {
        RiskLevel::Suspicious
    } else {
        RiskLevel::Safe
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::engine::RiskLevel;

    const PAGE: &str = "https://bank.example.com";

    #[test]
    fn test_clean_same_origin_url() {
        let checks = evaluate("https://example.com/about", "https://example.com");

        assert!(!checks.is_ip);
        assert!(!checks.punycode);
        assert!(!checks.has_at);
        assert!(!checks.http);
        assert!(!checks.suspicious_length);
        assert!(!checks.external);
        assert!(checks.susp_keywords.is_empty());
        assert!(!checks.susp_tld);
        assert_eq!(checks.score, 100);
        assert_eq!(level_for_score(checks.score), RiskLevel::Safe);
    }

    #[test]
    fn test_phishing_scenario_stacks_penalties() {
        let checks = evaluate("http://user@192.168.1.1/login.php", PAGE);

        assert!(checks.is_ip);
        assert!(checks.has_at);
        assert!(checks.http);
        assert!(checks.external);
        assert!(checks.susp_keywords.contains(&"login".to_string()));
        // 100 - 40 - 30 - 30 - 10 - 5 = -15 -> clamped
        assert_eq!(checks.score, 0);
        assert_eq!(level_for_score(checks.score), RiskLevel::Dangerous);
    }

    #[test]
    fn test_keyword_penalty_is_capped() {
        // Six keywords would be -30 uncapped; cap holds it at -25
        let url = "https://login-secure-account-verify-update-bank.example.com/";
        let checks = evaluate(url, "https://example.com");
        assert_eq!(checks.susp_keywords.len(), 6);

        let mut keywords_only = CheckResult {
            susp_keywords: checks.susp_keywords.clone(),
            ..Default::default()
        };
        keywords_only.score = score_from_checks(&keywords_only);
        assert_eq!(keywords_only.score, 75);
    }

    #[test]
    fn test_single_flag_penalties() {
        let cases: [(fn(&mut CheckResult), u8); 7] = [
            (|c| c.is_ip = true, 60),
            (|c| c.punycode = true, 70),
            (|c| c.has_at = true, 70),
            (|c| c.http = true, 70),
            (|c| c.suspicious_length = true, 85),
            (|c| c.external = true, 90),
            (|c| c.susp_tld = true, 85),
        ];

        for (set, expected) in cases {
            let mut checks = CheckResult::default();
            set(&mut checks);
            assert_eq!(score_from_checks(&checks), expected);
        }
    }

    #[test]
    fn test_adding_a_flag_never_raises_score() {
        let mut checks = CheckResult {
            external: true,
            ..Default::default()
        };
        let base = score_from_checks(&checks);

        checks.http = true;
        assert!(score_from_checks(&checks) < base);

        checks.is_ip = true;
        checks.punycode = true;
        checks.has_at = true;
        checks.suspicious_length = true;
        checks.susp_tld = true;
        assert_eq!(score_from_checks(&checks), 0);
    }

    #[test]
    fn test_score_in_range_for_arbitrary_input() {
        for url in ["", "not a url", "@@@", "http://", &"x".repeat(500)] {
            let checks = evaluate(url, "");
            assert!(checks.score <= 100, "score out of range for {:?}", url);
        }
    }

    #[test]
    fn test_external_check_fails_toward_suspicion() {
        // Unparsable page URL counts as external
        let checks = evaluate("https://example.com/x", "");
        assert!(checks.external);
        assert_eq!(checks.score, 90);

        // Relative link resolved against the page is same-origin
        let relative = evaluate("https://example.com/next", "https://example.com/page");
        assert!(!relative.external);
    }

    #[test]
    fn test_unparsable_url_has_no_host_signal() {
        let checks = evaluate("not a url", "https://example.com");
        assert!(!checks.is_ip);
        assert!(!checks.punycode);
        assert!(!checks.http);
        assert!(!checks.susp_tld);
        // resolves as a relative path against the page, so not external
        assert!(!checks.external);
        assert_eq!(checks.score, 100);
    }

    #[test]
    fn test_reason_order_is_fixed() {
        let checks = evaluate("http://user@192.168.1.1/login.php", PAGE);
        let reasons = reasons(&checks);

        assert_eq!(reasons[0], "Link uses IP address.");
        assert_eq!(reasons[1], "Contains \"@\" in URL.");
        assert_eq!(reasons[2], "Uses HTTP (not encrypted).");
        assert_eq!(reasons[3], "External domain link.");
        assert_eq!(reasons[4], "Suspicious keywords: login");
    }

    #[test]
    fn test_suspicious_tld_flag() {
        let checks = evaluate("https://shop.example.xyz/", "https://shop.example.xyz/");
        assert!(checks.susp_tld);
        assert_eq!(checks.score, 85);
        assert_eq!(level_for_score(checks.score), RiskLevel::Safe);
    }
}
