use validator::ValidateEmail;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Titles must contain something other than whitespace and stay under the column limit.
pub fn is_valid_title(title: &str) -> bool {
    let trimmed = title.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_TITLE_LEN
}

pub fn is_valid_page(page: i64, page_size: i64) -> bool {
    page >= 1 && (1..=MAX_PAGE_SIZE).contains(&page_size)
}
