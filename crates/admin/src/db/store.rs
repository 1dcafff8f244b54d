//! Typed collections on top of a [`StorageBackend`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use reeldeal_core::{
    Category, CategoryId, Customer, NewProduct, Order, OrderId, OrderStatus, Product, ProductId,
    ProductPatch, next_timestamp_id, slugify,
};

use super::credentials::{CREDENTIALS_KEY, StoredCredentials};
use super::{RepositoryError, StorageBackend, seed};

// =============================================================================
// Record Trait
// =============================================================================

/// A record kind stored as one JSON array under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key of the collection.
    const KEY: &'static str;

    /// Singular name used in error messages.
    const KIND: &'static str;

    /// Record identifier.
    fn id(&self) -> &str;

    /// Sample data written when the collection is absent.
    fn seed(now: DateTime<Utc>) -> Vec<Self>;
}

impl Record for Product {
    const KEY: &'static str = "reeldeal_products";
    const KIND: &'static str = "product";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn seed(now: DateTime<Utc>) -> Vec<Self> {
        seed::products(now)
    }
}

impl Record for Category {
    const KEY: &'static str = "reeldeal_categories";
    const KIND: &'static str = "category";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn seed(now: DateTime<Utc>) -> Vec<Self> {
        seed::categories(now)
    }
}

impl Record for Order {
    const KEY: &'static str = "reeldeal_orders";
    const KIND: &'static str = "order";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn seed(_now: DateTime<Utc>) -> Vec<Self> {
        seed::orders()
    }
}

impl Record for Customer {
    const KEY: &'static str = "reeldeal_customers";
    const KIND: &'static str = "customer";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn seed(_now: DateTime<Utc>) -> Vec<Self> {
        seed::customers()
    }
}

// =============================================================================
// Record Store
// =============================================================================

/// Shared handle to the record store.
///
/// Every operation holds one async lock for its whole read-modify-write
/// cycle, so concurrent requests in this process never interleave writes.
/// Nothing guards against a second process writing the same files.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<RecordStoreInner>,
}

struct RecordStoreInner {
    backend: StorageBackend,
    lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            inner: Arc::new(RecordStoreInner {
                backend,
                lock: Mutex::new(()),
            }),
        }
    }

    /// In-memory store, empty until first read seeds it.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(StorageBackend::memory())
    }

    /// List every record of a kind, seeding the collection if it is absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the stored blob is malformed,
    /// or `RepositoryError::Io` if storage cannot be read or written.
    pub async fn list<R: Record>(&self) -> Result<Vec<R>, RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        self.load::<R>().await
    }

    /// Fetch one record by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has that ID.
    pub async fn get<R: Record>(&self, id: &str) -> Result<R, RepositoryError> {
        self.list::<R>()
            .await?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found::<R>(id))
    }

    /// All stored customers.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::list`].
    pub async fn list_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.list::<Customer>().await
    }

    /// Write sample data into every collection.
    ///
    /// Without `force`, only absent collections are seeded. With `force`,
    /// existing collections are overwritten. Returns the keys that were written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if storage cannot be read or written.
    pub async fn seed_all(&self, force: bool) -> Result<Vec<&'static str>, RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        let now = Utc::now();
        let mut written = Vec::new();

        if self.reseed::<Product>(force, now).await? {
            written.push(Product::KEY);
        }
        if self.reseed::<Category>(force, now).await? {
            written.push(Category::KEY);
        }
        if self.reseed::<Order>(force, now).await? {
            written.push(Order::KEY);
        }
        if self.reseed::<Customer>(force, now).await? {
            written.push(Customer::KEY);
        }

        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Append a new product with a fresh timestamp ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the name is blank.
    #[tracing::instrument(skip(self, new), fields(name = %new.name))]
    pub async fn add_product(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        if new.name.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "product name is required".to_string(),
            ));
        }

        let _guard = self.inner.lock.lock().await;
        let mut products = self.load::<Product>().await?;

        let now = Utc::now();
        let id = next_timestamp_id(now, |candidate| {
            products.iter().any(|p| p.id.as_str() == candidate)
        });
        let product = Product::from_new(ProductId::new(id), new, now);

        products.push(product.clone());
        self.save(&products).await?;

        tracing::info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has that ID.
    #[tracing::instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        let mut products = self.load::<Product>().await?;

        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| not_found::<Product>(id.as_str()))?;
        product.apply(patch);
        let updated = product.clone();

        self.save(&products).await?;
        Ok(updated)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has that ID.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), RepositoryError> {
        self.remove::<Product>(id.as_str()).await
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Create a category from a name, deriving its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the trimmed name is empty, or
    /// `RepositoryError::Conflict` if another category already has the slug.
    #[tracing::instrument(skip(self))]
    pub async fn add_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::Validation(
                "category name is required".to_string(),
            ));
        }

        let _guard = self.inner.lock.lock().await;
        let mut categories = self.load::<Category>().await?;

        let slug = slugify(name);
        if categories.iter().any(|c| c.slug == slug) {
            return Err(RepositoryError::Conflict(format!(
                "category with slug '{slug}' already exists"
            )));
        }

        let now = Utc::now();
        let id = next_timestamp_id(now, |candidate| {
            categories.iter().any(|c| c.id.as_str() == candidate)
        });
        let category = Category::new(CategoryId::new(id), name, now);

        categories.push(category.clone());
        self.save(&categories).await?;

        tracing::info!(category_id = %category.id, slug = %category.slug, "Category added");
        Ok(category)
    }

    /// Remove a category. Products naming it are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category has that ID.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        self.remove::<Category>(id.as_str()).await
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Set an order's status, and its tracking number when one is given.
    ///
    /// A blank tracking number leaves the existing one in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has that ID.
    #[tracing::instrument(skip(self), fields(order_id = %id))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<Order, RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        let mut orders = self.load::<Order>().await?;

        let order = orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| not_found::<Order>(id.as_str()))?;
        order.status = status;
        if let Some(tracking) = tracking_number.filter(|t| !t.trim().is_empty()) {
            order.tracking_number = Some(tracking.trim().to_string());
        }
        let updated = order.clone();

        self.save(&orders).await?;
        tracing::info!(status = %updated.status, "Order status updated");
        Ok(updated)
    }

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------

    /// Load the stored admin credential, if one has been written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if storage cannot be read or is malformed.
    pub async fn load_credentials(&self) -> Result<Option<StoredCredentials>, RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        match self.inner.backend.read(CREDENTIALS_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Replace the stored admin credential.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if storage cannot be written.
    pub async fn save_credentials(
        &self,
        credentials: &StoredCredentials,
    ) -> Result<(), RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        let json = serde_json::to_string(credentials)?;
        self.inner.backend.write(CREDENTIALS_KEY, &json).await
    }

    // -------------------------------------------------------------------------
    // Internals (caller holds the lock)
    // -------------------------------------------------------------------------

    async fn load<R: Record>(&self) -> Result<Vec<R>, RepositoryError> {
        match self.inner.backend.read(R::KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                let records = R::seed(Utc::now());
                self.save(&records).await?;
                tracing::info!(key = R::KEY, count = records.len(), "Seeded collection");
                Ok(records)
            }
        }
    }

    async fn save<R: Record>(&self, records: &[R]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(records)?;
        self.inner.backend.write(R::KEY, &json).await
    }

    async fn reseed<R: Record>(
        &self,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        if !force && self.inner.backend.read(R::KEY).await?.is_some() {
            return Ok(false);
        }
        self.save(&R::seed(now)).await?;
        Ok(true)
    }

    async fn remove<R: Record>(&self, id: &str) -> Result<(), RepositoryError> {
        let _guard = self.inner.lock.lock().await;
        let mut records = self.load::<R>().await?;

        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(not_found::<R>(id));
        }

        self.save(&records).await?;
        tracing::info!(key = R::KEY, id, "Record deleted");
        Ok(())
    }
}

fn not_found<R: Record>(id: &str) -> RepositoryError {
    RepositoryError::NotFound(format!("{} {id}", R::KIND))
}
