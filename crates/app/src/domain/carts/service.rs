//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        books::models::BookUuid,
        carts::{
            errors::CartsServiceError,
            models::{CartSummary, CartUuid, CartView, RemoveOutcome},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn current_cart(&self, owner: UserUuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, owner).await?;
        let lines = self.items_repository.get_cart_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(CartView { cart, lines })
    }

    async fn add_item(
        &self,
        owner: UserUuid,
        book: BookUuid,
    ) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, owner).await?;

        // The FK on cart_items.book_uuid turns an unknown book into
        // BookNotFound via the error mapping.
        let quantity = self
            .items_repository
            .increment_item(&mut tx, cart.uuid, book)
            .await?;

        let lines = self.items_repository.get_cart_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        tracing::debug!(cart_uuid = %cart.uuid, book_uuid = %book, quantity, "added item to cart");

        Ok(CartSummary::of(cart.uuid, &lines))
    }

    async fn remove_item(
        &self,
        owner: UserUuid,
        book: BookUuid,
    ) -> Result<RemoveOutcome, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(title) = self.items_repository.get_book_title(&mut tx, book).await? else {
            return Err(CartsServiceError::BookNotFound);
        };

        let cart = self.carts_repository.ensure_cart(&mut tx, owner).await?;

        let rows_affected = self
            .items_repository
            .delete_item(&mut tx, cart.uuid, book)
            .await?;

        if rows_affected == 0 {
            // Nothing changed; roll the transaction back and report it.
            tx.rollback().await?;

            return Ok(RemoveOutcome::NotInCart { title });
        }

        let lines = self.items_repository.get_cart_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(RemoveOutcome::Removed {
            title,
            summary: CartSummary::of(cart.uuid, &lines),
        })
    }

    async fn clear_cart(&self, owner: UserUuid) -> Result<CartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.ensure_cart(&mut tx, owner).await?;

        let cleared = self.items_repository.clear_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        tracing::debug!(cart_uuid = %cart.uuid, cleared, "cleared cart");

        Ok(CartSummary::of(cart.uuid, &[]))
    }

    async fn cart_detail(
        &self,
        owner: UserUuid,
        cart: CartUuid,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_cart(&mut tx, cart).await?;

        if cart.owner_uuid != owner {
            return Err(CartsServiceError::Forbidden);
        }

        let lines = self.items_repository.get_cart_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(CartView { cart, lines })
    }

    async fn cart_summary(&self, owner: UserUuid) -> Result<CartSummary, CartsServiceError> {
        let view = self.current_cart(owner).await?;

        Ok(CartSummary::of(view.cart.uuid, &view.lines))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The owner's cart with resolved lines, created on first use.
    async fn current_cart(&self, owner: UserUuid) -> Result<CartView, CartsServiceError>;

    /// Add one unit of the book to the owner's cart (creating the cart when
    /// absent) and return the post-mutation summary.
    async fn add_item(
        &self,
        owner: UserUuid,
        book: BookUuid,
    ) -> Result<CartSummary, CartsServiceError>;

    /// Remove a book from the owner's cart.
    ///
    /// Removal takes out *all* units of the book, not one — the store's
    /// contract is "remove this title", asymmetric with add's one-unit
    /// increment. Removing a book that is not in the cart is not an error;
    /// it reports [`RemoveOutcome::NotInCart`] and changes nothing.
    async fn remove_item(
        &self,
        owner: UserUuid,
        book: BookUuid,
    ) -> Result<RemoveOutcome, CartsServiceError>;

    /// Empty the owner's cart.
    async fn clear_cart(&self, owner: UserUuid) -> Result<CartSummary, CartsServiceError>;

    /// A cart's line-item view. Only the owner may look at it.
    async fn cart_detail(
        &self,
        owner: UserUuid,
        cart: CartUuid,
    ) -> Result<CartView, CartsServiceError>;

    /// Compact state of the owner's cart for fragment rendering.
    async fn cart_summary(&self, owner: UserUuid) -> Result<CartSummary, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use crate::{
        domain::books::{BooksService, models::BookUpdate},
        test::context::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn test_current_cart_converges_on_one_cart_per_user() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("browser@example.com").await;

        let first = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("first visit should create the cart");

        let second = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("second visit should find the cart");

        assert_eq!(first.cart.uuid, second.cart.uuid);
        assert_eq!(second.cart.owner_uuid, member.uuid);
        assert!(second.lines.is_empty());
    }

    #[tokio::test]
    async fn test_adding_the_same_book_stacks_quantity() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("stacker@example.com").await;
        let author = ctx.create_author().await;
        let dune = ctx
            .create_book(author.uuid, "Dune", "9780441172719", 10_00)
            .await;

        for _ in 0..2 {
            ctx.carts
                .add_item(member.uuid, dune.uuid)
                .await
                .expect("add_item should succeed");
        }

        let summary = ctx
            .carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");

        assert_eq!(summary.lines, 1);
        assert_eq!(summary.units, 3);
        assert_eq!(summary.total, 30_00);

        let view = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("current_cart should succeed");

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_lines_keep_first_added_order() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("reader@example.com").await;
        let author = ctx.create_author().await;
        let dune = ctx
            .create_book(author.uuid, "Dune", "9780441172719", 10_00)
            .await;
        let hobbit = ctx
            .create_book(author.uuid, "The Hobbit", "9780345339683", 8_00)
            .await;

        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");
        ctx.carts
            .add_item(member.uuid, hobbit.uuid)
            .await
            .expect("add_item should succeed");

        // A second unit of an existing title must not move its line.
        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");

        let view = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("current_cart should succeed");

        let titles: Vec<&str> = view.lines.iter().map(|line| line.title.as_str()).collect();

        assert_eq!(titles, vec!["Dune", "The Hobbit"]);
        assert_eq!(view.total(), 28_00);
    }

    #[tokio::test]
    async fn test_add_unknown_book_is_book_not_found() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("lost@example.com").await;

        let result = ctx.carts.add_item(member.uuid, BookUuid::new()).await;

        assert!(matches!(result, Err(CartsServiceError::BookNotFound)));
    }

    #[tokio::test]
    async fn test_remove_item_takes_out_all_units() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("remover@example.com").await;
        let author = ctx.create_author().await;
        let dune = ctx
            .create_book(author.uuid, "Dune", "9780441172719", 10_00)
            .await;
        let hobbit = ctx
            .create_book(author.uuid, "The Hobbit", "9780345339683", 8_00)
            .await;

        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");
        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");
        ctx.carts
            .add_item(member.uuid, hobbit.uuid)
            .await
            .expect("add_item should succeed");

        let outcome = ctx
            .carts
            .remove_item(member.uuid, dune.uuid)
            .await
            .expect("remove_item should succeed");

        let RemoveOutcome::Removed { title, summary } = outcome else {
            panic!("expected the book to be removed");
        };

        assert_eq!(title, "Dune");
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.units, 1);
        assert_eq!(summary.total, 8_00);

        let view = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("current_cart should succeed");

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].title, "The Hobbit");
    }

    #[tokio::test]
    async fn test_remove_absent_book_is_informational_and_changes_nothing() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("careful@example.com").await;
        let author = ctx.create_author().await;
        let dune = ctx
            .create_book(author.uuid, "Dune", "9780441172719", 10_00)
            .await;
        let hobbit = ctx
            .create_book(author.uuid, "The Hobbit", "9780345339683", 8_00)
            .await;

        ctx.carts
            .add_item(member.uuid, hobbit.uuid)
            .await
            .expect("add_item should succeed");

        let outcome = ctx
            .carts
            .remove_item(member.uuid, dune.uuid)
            .await
            .expect("remove_item should succeed");

        let RemoveOutcome::NotInCart { title } = outcome else {
            panic!("expected a not-in-cart outcome");
        };

        assert_eq!(title, "Dune");

        let view = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("current_cart should succeed");

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].title, "The Hobbit");
        assert_eq!(view.lines[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_book_is_book_not_found() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("lost@example.com").await;

        let result = ctx.carts.remove_item(member.uuid, BookUuid::new()).await;

        assert!(matches!(result, Err(CartsServiceError::BookNotFound)));
    }

    #[tokio::test]
    async fn test_clear_cart_empties_every_line() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("undecided@example.com").await;
        let author = ctx.create_author().await;
        let dune = ctx
            .create_book(author.uuid, "Dune", "9780441172719", 10_00)
            .await;
        let hobbit = ctx
            .create_book(author.uuid, "The Hobbit", "9780345339683", 8_00)
            .await;

        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");
        ctx.carts
            .add_item(member.uuid, hobbit.uuid)
            .await
            .expect("add_item should succeed");

        let summary = ctx
            .carts
            .clear_cart(member.uuid)
            .await
            .expect("clear_cart should succeed");

        assert_eq!(summary.lines, 0);
        assert_eq!(summary.units, 0);
        assert_eq!(summary.total, 0);

        let view = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("current_cart should succeed");

        assert!(view.lines.is_empty());
    }

    #[tokio::test]
    async fn test_cart_detail_is_owner_only() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_member("owner@example.com").await;
        let other = ctx.create_member("other@example.com").await;

        let view = ctx
            .carts
            .current_cart(owner.uuid)
            .await
            .expect("current_cart should succeed");

        let detail = ctx
            .carts
            .cart_detail(owner.uuid, view.cart.uuid)
            .await
            .expect("the owner should see their cart");

        assert_eq!(detail.cart.uuid, view.cart.uuid);

        let forbidden = ctx.carts.cart_detail(other.uuid, view.cart.uuid).await;

        assert!(matches!(forbidden, Err(CartsServiceError::Forbidden)));

        let missing = ctx.carts.cart_detail(owner.uuid, CartUuid::new()).await;

        assert!(matches!(missing, Err(CartsServiceError::CartNotFound)));
    }

    #[tokio::test]
    async fn test_totals_follow_the_current_book_price() {
        let ctx = TestContext::new().await;
        let member = ctx.create_member("bargain@example.com").await;
        let author = ctx.create_author().await;
        let dune = ctx
            .create_book(author.uuid, "Dune", "9780441172719", 10_00)
            .await;

        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");
        ctx.carts
            .add_item(member.uuid, dune.uuid)
            .await
            .expect("add_item should succeed");

        ctx.books
            .update_book(
                dune.uuid,
                BookUpdate {
                    title: dune.title.clone(),
                    author_uuid: dune.author_uuid,
                    summary: dune.summary.clone(),
                    isbn: dune.isbn.clone(),
                    price: 12_50,
                    qty_on_hand: dune.qty_on_hand,
                    language: dune.language.clone(),
                    genres: dune.genres.clone(),
                },
            )
            .await
            .expect("update_book should succeed");

        let view = ctx
            .carts
            .current_cart(member.uuid)
            .await
            .expect("current_cart should succeed");

        assert_eq!(view.lines[0].unit_price, 12_50);
        assert_eq!(view.total(), 25_00);
    }
}
