//! Catalog service: books and categories

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Category, CreateBook, UpdateBook},
    repository::{BookStore, CategoryStore},
};

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
    categories: Arc<dyn CategoryStore>,
}

fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

fn category_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Category with id {} not found", id))
}

fn category_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Category name is required".to_string()));
    }
    Ok(name)
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self { books, categories }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books.list_books().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.books.get_book(id).await?.ok_or_else(|| book_not_found(id))
    }

    pub async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        data.check()?;
        let book = self.books.create_book(data).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        data.check()?;
        self.books.update_book(id, data).await?.ok_or_else(|| book_not_found(id))
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        if !self.books.delete_book(id).await? {
            return Err(book_not_found(id));
        }
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    pub async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        self.books.search_books(term).await
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.list_categories().await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.categories
            .get_category(id)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    pub async fn create_category(&self, name: &str) -> AppResult<Category> {
        self.categories.create_category(category_name(name)?).await
    }

    pub async fn rename_category(&self, id: i32, name: &str) -> AppResult<Category> {
        self.categories
            .rename_category(id, category_name(name)?)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        if !self.categories.delete_category(id).await? {
            return Err(category_not_found(id));
        }
        Ok(())
    }
}
