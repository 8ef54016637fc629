use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::product::{Product, ProductId};

/// Backend the products feature talks to when a request action arrives.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Product>>;

    /// Stores `product` over the entry with the same id and returns it.
    async fn update(&self, product: Product) -> Result<Product>;

    /// Stores a new product. An id of `0` is replaced with a fresh one.
    async fn create(&self, product: Product) -> Result<Product>;

    async fn delete(&self, product_id: ProductId) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn load(&self) -> Result<Vec<Product>> {
        Ok(self.products.lock().clone())
    }

    async fn update(&self, product: Product) -> Result<Product> {
        let mut products = self.products.lock();
        let stored = products
            .iter_mut()
            .find(|stored| stored.id == product.id)
            .ok_or_else(|| anyhow!("product {} not found", product.id))?;
        *stored = product.clone();
        Ok(product)
    }

    async fn create(&self, mut product: Product) -> Result<Product> {
        let mut products = self.products.lock();
        if product.is_new() {
            product.id = products
                .iter()
                .map(|p| p.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| anyhow!("no product id left"))?;
        } else if products.iter().any(|p| p.id == product.id) {
            return Err(anyhow!("product {} already exists", product.id));
        }
        products.push(product.clone());
        Ok(product)
    }

    async fn delete(&self, product_id: ProductId) -> Result<()> {
        let mut products = self.products.lock();
        let before = products.len();
        products.retain(|p| p.id != product_id);
        if products.len() == before {
            return Err(anyhow!("product {} not found", product_id));
        }
        Ok(())
    }
}
