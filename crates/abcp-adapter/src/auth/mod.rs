/*
[INPUT]:  Host name, login, md5 password digest
[OUTPUT]: Validated Credentials with administrator flag
[POS]:    Authentication layer - classifies credentials before any request is sent
[UPDATE]: When the API introduces new login schemes
*/

use crate::http::error::{AbcpError, Result};

/// Validated API credentials. The administrator flag is derived from the
/// host/login pair, never supplied by the caller.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub admin: bool,
}

impl Credentials {
    /// Classify a host/login/password triple.
    ///
    /// Admin logins look like `api@id200`, where the part after `@` must equal
    /// the first label of the host. Every other login must be used with an
    /// `idNNN.*` host and be either a numeric client code (5..=13 digits) or
    /// an e-mail address.
    pub fn validate(host: &str, login: &str, password: &str) -> Result<Self> {
        if !is_md5_hex(password) {
            return Err(AbcpError::PasswordType);
        }

        let admin = if let Some(shop_id) = login.strip_prefix("api@") {
            let host_label = host.split('.').next().unwrap_or("");
            shop_id == host_label
        } else {
            check_host(host)?;
            check_client_login(login)?;
            false
        };

        Ok(Credentials {
            login: login.to_owned(),
            password: password.to_owned(),
            admin,
        })
    }
}

/// A password is only accepted as a 32-character lowercase hex md5 digest.
fn is_md5_hex(password: &str) -> bool {
    password.len() == 32
        && password
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Client hosts carry the shop id in their first label: `id` followed by
/// digits, at most 9 characters overall.
fn check_host(host: &str) -> Result<()> {
    let label = host.split('.').next().unwrap_or("");
    let valid = label.len() < 10
        && label.starts_with("id")
        && label.len() > 2
        && label[2..].bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(AbcpError::UnsupportedHost(host.to_owned()))
    }
}

fn check_client_login(login: &str) -> Result<()> {
    let numeric = login.len() > 4
        && login.len() < 14
        && login.bytes().all(|b| b.is_ascii_digit());
    if numeric || is_email(login) {
        Ok(())
    } else {
        Err(AbcpError::UnsupportedLogin(login.to_owned()))
    }
}

/// Loose e-mail shape check: `local@domain.tld` with a 2-6 character TLD.
fn is_email(login: &str) -> bool {
    let Some((local, domain)) = login.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let label_ok = |l: &str| {
        !l.is_empty()
            && l.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    };
    let tld = labels[labels.len() - 1];
    labels[..labels.len() - 1].iter().all(|l| label_ok(l))
        && label_ok(tld)
        && (2..=6).contains(&tld.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_admin_login_matching_host() {
        let creds = Credentials::validate("id200", "api@id200", MD5).unwrap();
        assert!(creds.admin);
    }

    #[test]
    fn test_admin_login_mismatched_host_is_client() {
        // An api@ login pointed at a different shop is accepted but loses
        // admin rights.
        let creds = Credentials::validate("id200", "api@id999", MD5).unwrap();
        assert!(!creds.admin);
    }

    #[test]
    fn test_client_numeric_login() {
        let creds =
            Credentials::validate("id16800.public.api.abcp.ru", "10024", MD5).unwrap();
        assert!(!creds.admin);
    }

    #[test]
    fn test_client_email_login() {
        let creds =
            Credentials::validate("id16800.public.api.abcp.ru", "shop@example.com", MD5)
                .unwrap();
        assert!(!creds.admin);
    }

    #[test]
    fn test_bad_password_rejected() {
        let err =
            Credentials::validate("id200.public.api.abcp.ru", "10024", "hunter2").unwrap_err();
        assert!(matches!(err, AbcpError::PasswordType));

        // Uppercase hex is not accepted either.
        let upper = "0123456789ABCDEF0123456789ABCDEF";
        let err = Credentials::validate("id200.public.api.abcp.ru", "10024", upper).unwrap_err();
        assert!(matches!(err, AbcpError::PasswordType));
    }

    #[test]
    fn test_unsupported_host() {
        let err = Credentials::validate("example.com", "10024", MD5).unwrap_err();
        assert!(matches!(err, AbcpError::UnsupportedHost(_)));

        // First label too long.
        let err = Credentials::validate("id1234567890.api.abcp.ru", "10024", MD5).unwrap_err();
        assert!(matches!(err, AbcpError::UnsupportedHost(_)));
    }

    #[test]
    fn test_unsupported_login() {
        // Too short for a client code and not an e-mail.
        let err = Credentials::validate("id200.public.api.abcp.ru", "1234", MD5).unwrap_err();
        assert!(matches!(err, AbcpError::UnsupportedLogin(_)));

        let err =
            Credentials::validate("id200.public.api.abcp.ru", "not a login", MD5).unwrap_err();
        assert!(matches!(err, AbcpError::UnsupportedLogin(_)));
    }
}
