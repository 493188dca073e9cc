use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
/// Username and password submitted by the signup and login pages.
pub struct CredentialsForm {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        let form = CredentialsForm {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_err());

        let form = CredentialsForm {
            username: "reader".to_string(),
            password: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn filled_form_is_valid() {
        let form = CredentialsForm {
            username: "reader".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
