use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::MOBILE_NUMBER;

// Request para actualizar el perfil
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 150, message = "Full name is required"))]
    pub name: String,

    #[validate(regex(path = "MOBILE_NUMBER", message = "Mobile number must be 10 digits"))]
    pub mobile: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

impl UpdateProfileRequest {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_blank_name_is_rejected_after_trim() {
        let request = UpdateProfileRequest {
            name: "   ".to_string(),
            mobile: " 9876543210 ".to_string(),
            email: "asha@example.com ".to_string(),
        };
        assert!(request.validate().is_err());

        let request = request.trimmed();
        assert_eq!(request.mobile, "9876543210");
        assert_eq!(request.email, "asha@example.com");
        assert!(request.validate().is_err());
    }
}
