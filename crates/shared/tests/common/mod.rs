#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{
        AdminRepositoryTrait, CacheStoreTrait, CarouselRepositoryTrait, CartRepositoryTrait,
        DashboardRepositoryTrait, EmailRequest, EmailServiceTrait, FeaturedRepositoryTrait,
        HashingTrait, NewsletterRepositoryTrait, OrderCommandRepositoryTrait,
        OrderQueryRepositoryTrait, ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
        ReferralRepositoryTrait, SessionStoreTrait, TaxonomyRepositoryTrait,
        UserCommandRepositoryTrait, UserQueryRepositoryTrait,
    },
    config::BankConfig,
    domain::{
        notifications::Notifications,
        order_status::OrderStatus,
        requests::{
            CarouselPosition, CreateCarouselItemRequest, CreateDoctorRecord,
            CreateFeaturedRequest, CreateProductRequest, CreateReferralRequest,
            CreateTaxonomyRequest, FindAllNewsletters, FindAllOrders, FindAllProducts,
            FindAllReferrals, FindAllUsers, NewOrder, UpdateCarouselItemRequest,
            UpdateFeaturedRequest, UpdateProductRequest, UpdateProfileRequest,
            UpdateTaxonomyRequest,
        },
        responses::DashboardStatsResponse,
        session::Session,
    },
    errors::{RepositoryError, ServiceError},
    model::{
        AdminUser, CarouselItem, CartItem, CartLine, FeaturedCarousel, FeaturedProduct,
        Newsletter, Order, OrderItem, OrderWithBuyer, Product, Referral, Taxonomy, User,
    },
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};
use tokio::sync::Mutex;

pub const ADMIN_EMAIL: &str = "ops@medsupply.example";

pub fn registry() -> Arc<Mutex<Registry>> {
    Arc::new(Mutex::new(Registry::default()))
}

pub fn notifications() -> Notifications {
    Notifications::new("https://medsupply.example/", Some(ADMIN_EMAIL.to_string()))
}

pub fn bank() -> BankConfig {
    BankConfig {
        bank_name: "First Clinical Bank".into(),
        account_name: "MedSupply Ltd".into(),
        account_number: "00112233".into(),
        iban: Some("GB00FCB00112233".into()),
        swift: None,
        instructions: "Use your order number as the transfer reference.".into(),
    }
}

pub fn doctor(user_id: i32, email: &str, approved: bool) -> User {
    User {
        user_id,
        email: email.to_string(),
        password: "hashed:secret123".into(),
        first_name: "Gregory".into(),
        last_name: "House".into(),
        phone: None,
        license_number: format!("LIC-{user_id:04}"),
        specialty: Some("Diagnostics".into()),
        clinic_name: None,
        address: None,
        is_approved: approved,
        approved_at: approved.then(|| Utc::now().naive_utc()),
        created_at: Some(Utc::now().naive_utc()),
        updated_at: None,
    }
}

pub fn product(product_id: i32, name: &str, price: i64, stock: i32) -> Product {
    Product {
        product_id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        sku: None,
        price,
        stock,
        image_url: None,
        category_id: None,
        brand_id: None,
        is_featured: false,
        is_active: true,
        created_at: Some(Utc::now().naive_utc()),
        updated_at: None,
    }
}

/// `hash("x") == "hashed:x"`.
pub struct FakeHasher;

#[async_trait]
impl HashingTrait for FakeHasher {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        Ok(format!("hashed:{password}"))
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        if hashed_password == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }
}

#[derive(Default)]
pub struct RecordingEmail {
    pub sent: StdMutex<Vec<EmailRequest>>,
}

impl RecordingEmail {
    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.to.clone())
            .collect()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingEmail {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        self.sent.lock().unwrap().push(req.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessions {
    pub sessions: StdMutex<HashMap<String, Session>>,
}

#[async_trait]
impl SessionStoreTrait for MemorySessions {
    async fn create_session(&self, session: &Session, _ttl: Duration) -> Result<(), ServiceError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(session_id).cloned()
    }

    async fn delete_session(&self, session_id: &str) -> bool {
        self.sessions.lock().unwrap().remove(session_id).is_some()
    }

    async fn refresh_session(&self, session: &Session, _ttl: Duration) -> bool {
        self.sessions
            .lock()
            .unwrap()
            .contains_key(&session.session_id)
    }

    async fn delete_user_sessions(&self, user_id: i32) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.doctor_id() != Some(user_id));
        before - sessions.len()
    }
}

#[derive(Default)]
pub struct RecordingCache {
    pub values: StdMutex<HashMap<String, String>>,
    pub deleted: StdMutex<Vec<String>>,
}

#[async_trait]
impl CacheStoreTrait for RecordingCache {
    async fn get_raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn set_raw(&self, key: &str, value: &str, _expiration: Duration) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn delete(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
        self.deleted.lock().unwrap().push(key.to_string());
    }
}

/// Users listed in `with_orders` are still referenced by orders, so deleting
/// them fails like the `orders.user_id` foreign key does.
#[derive(Default)]
pub struct UserStore {
    pub users: StdMutex<Vec<User>>,
    pub with_orders: StdMutex<Vec<i32>>,
}

impl UserStore {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: StdMutex::new(users),
            with_orders: StdMutex::new(Vec::new()),
        }
    }

    pub fn mark_ordered(&self, id: i32) {
        self.with_orders.lock().unwrap().push(id);
    }

    pub fn get(&self, id: i32) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == id)
            .cloned()
    }

    fn modify(&self, id: i32, f: impl FnOnce(&mut User)) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.user_id == id)
            .ok_or(RepositoryError::NotFound)?;
        f(user);
        Ok(user.clone())
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserStore {
    async fn find_all(&self, _req: &FindAllUsers) -> Result<(Vec<User>, i64), RepositoryError> {
        let users = self.users.lock().unwrap().clone();
        let total = users.len() as i64;
        Ok((users, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserStore {
    async fn create_doctor(&self, req: &CreateDoctorRecord) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == req.email) {
            return Err(RepositoryError::AlreadyExists("users_email_key".into()));
        }

        let user = User {
            user_id: users.len() as i32 + 1,
            email: req.email.clone(),
            password: req.password_hash.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            phone: req.phone.clone(),
            license_number: req.license_number.clone(),
            specialty: req.specialty.clone(),
            clinic_name: req.clinic_name.clone(),
            address: req.address.clone(),
            is_approved: false,
            approved_at: None,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<User, RepositoryError> {
        self.modify(id, |u| {
            u.first_name = req.first_name.clone();
            u.last_name = req.last_name.clone();
            u.phone = req.phone.clone();
            u.specialty = req.specialty.clone();
            u.clinic_name = req.clinic_name.clone();
            u.address = req.address.clone();
        })
    }

    async fn set_approval(&self, id: i32, approved: bool) -> Result<User, RepositoryError> {
        self.modify(id, |u| {
            u.is_approved = approved;
            u.approved_at = approved.then(|| Utc::now().naive_utc());
        })
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        if self.with_orders.lock().unwrap().contains(&id) {
            return Err(RepositoryError::ForeignKey("orders_user_id_fkey".into()));
        }

        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.user_id != id);
        if users.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ProductStore {
    pub products: StdMutex<Vec<Product>>,
}

impl ProductStore {
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products: StdMutex::new(products),
        }
    }

    pub fn get(&self, id: i32) -> Option<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.product_id == id)
            .cloned()
    }

    pub fn adjust_stock(&self, id: i32, delta: i32) {
        if let Some(p) = self
            .products
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.product_id == id)
        {
            p.stock += delta;
        }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductStore {
    async fn find_all(
        &self,
        _req: &FindAllProducts,
        active_only: bool,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let rows: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }
}

impl ProductStore {
    fn ensure_unique_slug(&self, slug: &str, except: i32) -> Result<(), RepositoryError> {
        let taken = self
            .products
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.slug == slug && p.product_id != except);
        if taken {
            return Err(RepositoryError::AlreadyExists("products_slug_key".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductStore {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        slug: &str,
    ) -> Result<Product, RepositoryError> {
        self.ensure_unique_slug(slug, 0)?;

        let mut products = self.products.lock().unwrap();
        let next_id = products.iter().map(|p| p.product_id).max().unwrap_or(0) + 1;
        let row = Product {
            product_id: next_id,
            name: req.name.clone(),
            slug: slug.to_string(),
            description: req.description.clone(),
            sku: req.sku.clone(),
            price: req.price,
            stock: req.stock,
            image_url: req.image_url.clone(),
            category_id: req.category_id,
            brand_id: req.brand_id,
            is_featured: req.is_featured,
            is_active: req.is_active,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        };
        products.push(row.clone());
        Ok(row)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
        slug: &str,
    ) -> Result<Product, RepositoryError> {
        self.ensure_unique_slug(slug, req.id)?;

        let mut products = self.products.lock().unwrap();
        let row = products
            .iter_mut()
            .find(|p| p.product_id == req.id)
            .ok_or(RepositoryError::NotFound)?;
        row.name = req.name.clone();
        row.slug = slug.to_string();
        row.description = req.description.clone();
        row.sku = req.sku.clone();
        row.price = req.price;
        row.stock = req.stock;
        row.image_url = req.image_url.clone();
        row.category_id = req.category_id;
        row.brand_id = req.brand_id;
        row.is_featured = req.is_featured;
        row.is_active = req.is_active;
        row.updated_at = Some(Utc::now().naive_utc());
        Ok(row.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.product_id != id);
        if products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

pub struct CartStore {
    pub items: StdMutex<Vec<CartItem>>,
    products: Arc<ProductStore>,
}

impl CartStore {
    pub fn new(products: Arc<ProductStore>) -> Self {
        Self {
            items: StdMutex::new(Vec::new()),
            products,
        }
    }

    pub fn quantities(&self, user_id: i32) -> Vec<(i32, i32)> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| (i.product_id, i.quantity))
            .collect()
    }
}

#[async_trait]
impl CartRepositoryTrait for CartStore {
    async fn find_lines(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        let items = self.items.lock().unwrap().clone();
        Ok(items
            .into_iter()
            .filter(|i| i.user_id == user_id)
            .filter_map(|i| {
                let p = self.products.get(i.product_id)?;
                Some(CartLine {
                    cart_item_id: i.cart_item_id,
                    product_id: p.product_id,
                    quantity: i.quantity,
                    name: p.name,
                    slug: p.slug,
                    price: p.price,
                    stock: p.stock,
                    image_url: p.image_url,
                    is_active: p.is_active,
                })
            })
            .collect())
    }

    async fn find_item(
        &self,
        user_id: i32,
        cart_item_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.user_id == user_id && i.cart_item_id == cart_item_id)
            .cloned())
    }

    async fn find_by_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.user_id == user_id && i.product_id == product_id)
            .cloned())
    }

    async fn upsert_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items
            .iter_mut()
            .find(|i| i.user_id == user_id && i.product_id == product_id)
        {
            item.quantity += quantity;
            return Ok(item.clone());
        }

        let next_id = items.iter().map(|i| i.cart_item_id).max().unwrap_or(0) + 1;
        let item = CartItem {
            cart_item_id: next_id,
            user_id,
            product_id,
            quantity,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        cart_item_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        Ok(items
            .iter_mut()
            .find(|i| i.user_id == user_id && i.cart_item_id == cart_item_id)
            .map(|item| {
                item.quantity = quantity;
                item.clone()
            }))
    }

    async fn remove_item(&self, user_id: i32, cart_item_id: i32) -> Result<bool, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| !(i.user_id == user_id && i.cart_item_id == cart_item_id));
        Ok(items.len() != before)
    }

    async fn clear(&self, user_id: i32) -> Result<u64, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.user_id != user_id);
        Ok((before - items.len()) as u64)
    }
}

/// Orders plus their items; checkout moves stock and empties the cart like the
/// database transaction does.
pub struct OrderStore {
    pub orders: StdMutex<Vec<Order>>,
    pub items: StdMutex<Vec<OrderItem>>,
    users: Arc<UserStore>,
    products: Arc<ProductStore>,
    cart: Arc<CartStore>,
}

impl OrderStore {
    pub fn new(users: Arc<UserStore>, products: Arc<ProductStore>, cart: Arc<CartStore>) -> Self {
        Self {
            orders: StdMutex::new(Vec::new()),
            items: StdMutex::new(Vec::new()),
            users,
            products,
            cart,
        }
    }

    pub fn status_of(&self, order_id: i32) -> Option<String> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == order_id)
            .map(|o| o.status.clone())
    }

    fn with_buyer(&self, order: Order) -> OrderWithBuyer {
        let buyer = self.users.get(order.user_id);
        OrderWithBuyer {
            buyer_email: buyer.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
            buyer_name: buyer.map(|u| u.full_name()).unwrap_or_default(),
            order,
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderStore {
    async fn find_all(
        &self,
        _req: &FindAllOrders,
    ) -> Result<(Vec<OrderWithBuyer>, i64), RepositoryError> {
        let orders = self.orders.lock().unwrap().clone();
        let total = orders.len() as i64;
        Ok((orders.into_iter().map(|o| self.with_buyer(o)).collect(), total))
    }

    async fn find_by_user(
        &self,
        user_id: i32,
        _req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        let total = orders.len() as i64;
        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithBuyer>, RepositoryError> {
        let order = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == id)
            .cloned();
        Ok(order.map(|o| self.with_buyer(o)))
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderStore {
    async fn create_order(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        for item in &new_order.items {
            let stock = self
                .products
                .get(item.product_id)
                .map(|p| p.stock)
                .unwrap_or(0);
            if stock < item.quantity {
                return Err(RepositoryError::InsufficientStock(item.product_name.clone()));
            }
        }

        let order = {
            let mut orders = self.orders.lock().unwrap();
            let order = Order {
                order_id: orders.len() as i32 + 1,
                order_number: new_order.order_number.clone(),
                user_id: new_order.user_id,
                status: OrderStatus::Pending.as_str().to_string(),
                payment_method: new_order.payment_method.as_str().to_string(),
                payment_reference: None,
                payment_submitted_at: None,
                total: new_order.total,
                shipping_address: new_order.shipping_address.clone(),
                notes: new_order.notes.clone(),
                decline_reason: None,
                created_at: Some(Utc::now().naive_utc()),
                updated_at: None,
            };
            orders.push(order.clone());
            order
        };

        {
            let mut items = self.items.lock().unwrap();
            for item in &new_order.items {
                self.products.adjust_stock(item.product_id, -item.quantity);
                let order_item_id = items.len() as i32 + 1;
                items.push(OrderItem {
                    order_item_id,
                    order_id: order.order_id,
                    product_id: Some(item.product_id),
                    product_name: item.product_name.clone(),
                    product_price: item.product_price,
                    product_image: item.product_image.clone(),
                    quantity: item.quantity,
                    subtotal: item.subtotal,
                });
            }
        }

        self.cart.clear(new_order.user_id).await?;
        Ok(order)
    }

    async fn transition(
        &self,
        order_id: i32,
        next: OrderStatus,
        reason: Option<&str>,
    ) -> Result<Option<Order>, RepositoryError> {
        let moved = {
            let mut orders = self.orders.lock().unwrap();
            orders
                .iter_mut()
                .find(|o| o.order_id == order_id && o.status == OrderStatus::Pending.as_str())
                .map(|o| {
                    o.status = next.as_str().to_string();
                    o.decline_reason = reason.map(str::to_string);
                    o.clone()
                })
        };

        if moved.is_some() && next.releases_stock() {
            let items = self.items.lock().unwrap().clone();
            for item in items.iter().filter(|i| i.order_id == order_id) {
                if let Some(product_id) = item.product_id {
                    self.products.adjust_stock(product_id, item.quantity);
                }
            }
        }

        Ok(moved)
    }

    async fn submit_payment(
        &self,
        order_id: i32,
        user_id: i32,
        reference: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders
            .iter_mut()
            .find(|o| {
                o.order_id == order_id
                    && o.user_id == user_id
                    && o.status == OrderStatus::Pending.as_str()
            })
            .map(|o| {
                o.payment_reference = Some(reference.to_string());
                o.payment_submitted_at = Some(Utc::now().naive_utc());
                o.clone()
            }))
    }
}

/// Category or brand table; slugs are unique like the real constraint.
#[derive(Default)]
pub struct TaxonomyStore {
    pub rows: StdMutex<Vec<Taxonomy>>,
}

impl TaxonomyStore {
    pub fn with(rows: Vec<Taxonomy>) -> Self {
        Self {
            rows: StdMutex::new(rows),
        }
    }

    fn ensure_unique_slug(rows: &[Taxonomy], slug: &str, except: i32) -> Result<(), RepositoryError> {
        if rows.iter().any(|c| c.slug == slug && c.id != except) {
            return Err(RepositoryError::AlreadyExists("slug_key".into()));
        }
        Ok(())
    }
}

pub fn taxonomy_row(id: i32, name: &str) -> Taxonomy {
    Taxonomy {
        id,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        image_url: None,
        created_at: Some(Utc::now().naive_utc()),
        updated_at: None,
    }
}

#[async_trait]
impl TaxonomyRepositoryTrait for TaxonomyStore {
    async fn find_all(&self) -> Result<Vec<Taxonomy>, RepositoryError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Taxonomy>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(
        &self,
        req: &CreateTaxonomyRequest,
        slug: &str,
    ) -> Result<Taxonomy, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        Self::ensure_unique_slug(&rows, slug, 0)?;

        let row = Taxonomy {
            id: rows.len() as i32 + 1,
            name: req.name.clone(),
            slug: slug.to_string(),
            description: req.description.clone(),
            image_url: req.image_url.clone(),
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        req: &UpdateTaxonomyRequest,
        slug: &str,
    ) -> Result<Taxonomy, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        Self::ensure_unique_slug(&rows, slug, req.id)?;

        let row = rows
            .iter_mut()
            .find(|c| c.id == req.id)
            .ok_or(RepositoryError::NotFound)?;
        row.name = req.name.clone();
        row.slug = slug.to_string();
        row.description = req.description.clone();
        row.image_url = req.image_url.clone();
        Ok(row.clone())
    }

    async fn update_image(&self, id: i32, image_url: &str) -> Result<Taxonomy, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.image_url = Some(image_url.to_string());
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct NewsletterStore {
    pub rows: StdMutex<Vec<Newsletter>>,
}

#[async_trait]
impl NewsletterRepositoryTrait for NewsletterStore {
    async fn find_all(
        &self,
        _req: &FindAllNewsletters,
    ) -> Result<(Vec<Newsletter>, i64), RepositoryError> {
        let rows = self.rows.lock().unwrap().clone();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn create(&self, email: &str) -> Result<Newsletter, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.email == email) {
            return Err(RepositoryError::AlreadyExists("newsletters_email_key".into()));
        }

        let row = Newsletter {
            newsletter_id: rows.len() as i32 + 1,
            email: email.to_string(),
            created_at: Some(Utc::now().naive_utc()),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.email != email);
        Ok(rows.len() != before)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.newsletter_id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct ReferralStore {
    pub rows: StdMutex<Vec<Referral>>,
}

#[async_trait]
impl ReferralRepositoryTrait for ReferralStore {
    async fn create(
        &self,
        referrer_id: i32,
        req: &CreateReferralRequest,
    ) -> Result<Referral, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = Referral {
            referral_id: rows.len() as i32 + 1,
            referrer_id,
            referred_name: req.referred_name.clone(),
            referred_email: req.referred_email.trim().to_lowercase(),
            message: req.message.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_all(
        &self,
        referrer_id: Option<i32>,
        _req: &FindAllReferrals,
    ) -> Result<(Vec<Referral>, i64), RepositoryError> {
        let rows: Vec<Referral> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| referrer_id.is_none_or(|id| r.referrer_id == id))
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }
}

pub fn slide(id: i32, title: &str, display_order: i32) -> CarouselItem {
    CarouselItem {
        carousel_item_id: id,
        title: title.to_string(),
        subtitle: None,
        image_url: format!("/uploads/carousel/{id}.png"),
        link_url: None,
        button_text: None,
        background_color: None,
        text_color: None,
        display_order,
        is_active: true,
        created_at: Some(Utc::now().naive_utc()),
        updated_at: None,
    }
}

/// Counts `find_all` calls so cache hits are observable.
#[derive(Default)]
pub struct CarouselStore {
    pub items: StdMutex<Vec<CarouselItem>>,
    pub reads: StdMutex<usize>,
}

impl CarouselStore {
    pub fn with(items: Vec<CarouselItem>) -> Self {
        Self {
            items: StdMutex::new(items),
            reads: StdMutex::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    pub fn orders(&self) -> Vec<(i32, i32)> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(|i| (i.carousel_item_id, i.display_order))
            .collect()
    }
}

#[async_trait]
impl CarouselRepositoryTrait for CarouselStore {
    async fn find_all(&self, active_only: bool) -> Result<Vec<CarouselItem>, RepositoryError> {
        *self.reads.lock().unwrap() += 1;

        let mut items: Vec<CarouselItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| !active_only || i.is_active)
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.display_order, i.carousel_item_id));
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CarouselItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.carousel_item_id == id)
            .cloned())
    }

    async fn create(
        &self,
        req: &CreateCarouselItemRequest,
    ) -> Result<CarouselItem, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let next_id = items.iter().map(|i| i.carousel_item_id).max().unwrap_or(0) + 1;
        let mut row = slide(next_id, &req.title, req.display_order);
        row.subtitle = req.subtitle.clone();
        row.image_url = req.image_url.clone();
        row.is_active = req.is_active;
        items.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        req: &UpdateCarouselItemRequest,
    ) -> Result<CarouselItem, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let row = items
            .iter_mut()
            .find(|i| i.carousel_item_id == req.id)
            .ok_or(RepositoryError::NotFound)?;
        row.title = req.title.clone();
        row.subtitle = req.subtitle.clone();
        row.image_url = req.image_url.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.carousel_item_id != id);
        if items.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn reorder(&self, positions: &[CarouselPosition]) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let known = |id: i32| items.iter().any(|i| i.carousel_item_id == id);
        if !positions.iter().all(|p| known(p.id)) {
            return Err(RepositoryError::NotFound);
        }

        for position in positions {
            if let Some(item) = items
                .iter_mut()
                .find(|i| i.carousel_item_id == position.id)
            {
                item.display_order = position.display_order;
            }
        }
        Ok(())
    }
}

/// Featured rows joined against a [`ProductStore`]; one row per product.
pub struct FeaturedStore {
    pub rows: StdMutex<Vec<FeaturedCarousel>>,
    products: Arc<ProductStore>,
}

impl FeaturedStore {
    pub fn new(products: Arc<ProductStore>) -> Self {
        Self {
            rows: StdMutex::new(Vec::new()),
            products,
        }
    }

    fn joined(&self, row: &FeaturedCarousel) -> Option<FeaturedProduct> {
        self.products.get(row.product_id).map(|product| FeaturedProduct {
            featured_id: row.featured_id,
            display_order: row.display_order,
            featured_active: row.is_active,
            product,
        })
    }
}

#[async_trait]
impl FeaturedRepositoryTrait for FeaturedStore {
    async fn find_all(&self, active_only: bool) -> Result<Vec<FeaturedProduct>, RepositoryError> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .iter()
            .filter_map(|row| self.joined(row))
            .filter(|f| !active_only || (f.featured_active && f.product.is_active))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FeaturedProduct>, RepositoryError> {
        let row = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.featured_id == id)
            .cloned();
        Ok(row.and_then(|row| self.joined(&row)))
    }

    async fn create(
        &self,
        req: &CreateFeaturedRequest,
    ) -> Result<FeaturedCarousel, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.product_id == req.product_id) {
            return Err(RepositoryError::AlreadyExists(
                "featured_carousel_product_id_key".into(),
            ));
        }

        let row = FeaturedCarousel {
            featured_id: rows.len() as i32 + 1,
            product_id: req.product_id,
            display_order: req.display_order,
            is_active: true,
            created_at: Some(Utc::now().naive_utc()),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        req: &UpdateFeaturedRequest,
    ) -> Result<FeaturedCarousel, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.featured_id == req.id)
            .ok_or(RepositoryError::NotFound)?;
        row.display_order = req.display_order;
        row.is_active = req.is_active;
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.featured_id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

pub fn admin(admin_id: i32, username: &str, password: &str) -> AdminUser {
    AdminUser {
        admin_id,
        username: username.to_string(),
        email: None,
        password: format!("hashed:{password}"),
        created_at: Some(Utc::now().naive_utc()),
    }
}

#[derive(Default)]
pub struct AdminStore {
    pub admins: StdMutex<Vec<AdminUser>>,
}

impl AdminStore {
    pub fn with(admins: Vec<AdminUser>) -> Self {
        Self {
            admins: StdMutex::new(admins),
        }
    }
}

#[async_trait]
impl AdminRepositoryTrait for AdminStore {
    async fn find_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        Ok(self.admins.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AdminUser>, RepositoryError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.admin_id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create_admin(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let mut admins = self.admins.lock().unwrap();
        let mut row = admin(admins.len() as i32 + 1, username, "");
        row.email = email.map(str::to_string);
        row.password = password_hash.to_string();
        admins.push(row.clone());
        Ok(row)
    }
}

/// Serves fixed stats, or fails when `stats` is `None`.
pub struct DashboardStore {
    pub stats: Option<DashboardStatsResponse>,
}

#[async_trait]
impl DashboardRepositoryTrait for DashboardStore {
    async fn stats(&self) -> Result<DashboardStatsResponse, RepositoryError> {
        self.stats
            .clone()
            .ok_or_else(|| RepositoryError::Custom("stats query failed".into()))
    }
}
