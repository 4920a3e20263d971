//! 表单校验辅助
//!
//! 登录/注册表单的客户端校验规则。只做提交前的快速反馈，
//! 权威校验始终在服务端。

/// 邮箱形状检查：非空本地部分 + `@` + 带点的域名，不含空白
pub fn is_valid_email(s: &str) -> bool {
    if s.is_empty() || s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// 全名只允许字母和空格
pub fn is_valid_full_name(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// 密码强度：至少 8 位字母数字，且同时包含大写、小写和数字
pub fn is_strong_password(s: &str) -> bool {
    s.len() >= 8
        && s.chars().all(|c| c.is_ascii_alphanumeric())
        && s.chars().any(|c| c.is_ascii_lowercase())
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ann@example.com"));
        assert!(is_valid_email("a.b@mail.co.id"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ann"));
        assert!(!is_valid_email("ann@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("ann @example.com"));
        assert!(!is_valid_email("ann@ex@ample.com"));
    }

    #[test]
    fn full_name_allows_letters_and_spaces_only() {
        assert!(is_valid_full_name("Ann Louis"));
        assert!(is_valid_full_name("  Ann  "));
        assert!(!is_valid_full_name(""));
        assert!(!is_valid_full_name("   "));
        assert!(!is_valid_full_name("Ann3"));
        assert!(!is_valid_full_name("Ann-Louis"));
    }

    #[test]
    fn password_needs_length_and_mixed_classes() {
        assert!(is_strong_password("Abcdef12"));
        assert!(!is_strong_password("Abc12"));       // too short
        assert!(!is_strong_password("abcdefg1"));    // no uppercase
        assert!(!is_strong_password("ABCDEFG1"));    // no lowercase
        assert!(!is_strong_password("Abcdefgh"));    // no digit
        assert!(!is_strong_password("Abcdef1!"));    // symbol not allowed
    }
}
