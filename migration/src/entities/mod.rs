pub mod short_url;
pub mod url_click;
pub mod user;

pub use short_url::Entity as ShortUrlEntity;
pub use url_click::Entity as UrlClickEntity;
pub use user::Entity as UserEntity;
