mod admin_user;
mod cart;
mod homepage;
mod newsletter;
mod order;
mod product;
mod referral;
mod taxonomy;
mod user;

pub use self::admin_user::AdminUser;
pub use self::cart::{CartItem, CartLine};
pub use self::homepage::{CarouselItem, FeaturedCarousel, FeaturedProduct};
pub use self::newsletter::Newsletter;
pub use self::order::{Order, OrderItem, OrderWithBuyer};
pub use self::product::Product;
pub use self::referral::Referral;
pub use self::taxonomy::{Taxonomy, TaxonomyKind};
pub use self::user::User;
