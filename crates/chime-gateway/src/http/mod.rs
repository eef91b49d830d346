pub mod check;
pub mod health;
pub mod settings;
pub mod test_mail;
