//! Test helpers.

use std::sync::Arc;

use bibliotek_app::{
    auth::{AuthUser, MockAuthService},
    context::AppContext,
    domain::{
        authors::{MockAuthorsService, models::Author},
        books::{MockBooksService, models::Book},
        carts::{
            MockCartsService,
            models::{Cart, CartLine, CartSummary, CartUuid, CartView},
        },
        imports::MockImportsService,
        loans::{
            MockLoansService,
            models::{BookCopy, CopyStatus, CopyUuid, LoanedCopy},
        },
        stats::MockStatsService,
        users::{
            MockUsersService,
            models::{UserRole, UserUuid},
        },
    },
    integrations::accounting::MockAccountingService,
};
use jiff::Timestamp;
use salvo::prelude::*;
use serde_json::json;
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const fn test_member() -> AuthUser {
    AuthUser {
        uuid: TEST_USER_UUID,
        role: UserRole::Member,
    }
}

pub(crate) const fn test_librarian() -> AuthUser {
    AuthUser {
        uuid: TEST_USER_UUID,
        role: UserRole::Librarian,
    }
}

#[salvo::handler]
pub(crate) async fn inject_member(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_auth_user(test_member());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_librarian(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_auth_user(test_librarian());
    ctrl.call_next(req, depot, res).await;
}

/// A context where every service is an expectation-free mock: any call a
/// test has not explicitly routed through an override panics.
fn base_context() -> AppContext {
    AppContext {
        authors: Arc::new(MockAuthorsService::new()),
        books: Arc::new(MockBooksService::new()),
        carts: Arc::new(MockCartsService::new()),
        imports: Arc::new(MockImportsService::new()),
        loans: Arc::new(MockLoansService::new()),
        stats: Arc::new(MockStatsService::new()),
        users: Arc::new(MockUsersService::new()),
        auth: Arc::new(MockAuthService::new()),
        accounting: Arc::new(MockAccountingService::new()),
    }
}

pub(crate) fn state_with_authors(authors: MockAuthorsService) -> Arc<State> {
    let mut app = base_context();
    app.authors = Arc::new(authors);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_books(books: MockBooksService) -> Arc<State> {
    let mut app = base_context();
    app.books = Arc::new(books);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_imports(imports: MockImportsService) -> Arc<State> {
    let mut app = base_context();
    app.imports = Arc::new(imports);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    let mut app = base_context();
    app.carts = Arc::new(carts);
    Arc::new(State::new(app))
}

/// Store-page state needs both the books and carts services live.
pub(crate) fn state_with_store(books: MockBooksService, carts: MockCartsService) -> Arc<State> {
    let mut app = base_context();
    app.books = Arc::new(books);
    app.carts = Arc::new(carts);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_loans(loans: MockLoansService) -> Arc<State> {
    let mut app = base_context();
    app.loans = Arc::new(loans);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = base_context();
    app.auth = Arc::new(auth);
    Arc::new(State::new(app))
}

pub(crate) fn state_with_accounting(accounting: MockAccountingService) -> Arc<State> {
    let mut app = base_context();
    app.accounting = Arc::new(accounting);
    Arc::new(State::new(app))
}

/// Home-page state needs both the stats and users services live.
pub(crate) fn state_with_stats(stats: MockStatsService, users: MockUsersService) -> Arc<State> {
    let mut app = base_context();
    app.stats = Arc::new(stats);
    app.users = Arc::new(users);
    Arc::new(State::new(app))
}

pub(crate) fn make_author(uuid: bibliotek_app::domain::authors::models::AuthorUuid) -> Author {
    Author {
        uuid,
        first_name: "Frank".to_string(),
        last_name: "Herbert".to_string(),
        date_of_birth: None,
        date_of_death: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_book(uuid: bibliotek_app::domain::books::models::BookUuid) -> Book {
    Book {
        uuid,
        title: "Dune".to_string(),
        author_uuid: Uuid::nil().into(),
        summary: "Spice and sand.".to_string(),
        isbn: "9780441013593".to_string(),
        price: 10_00,
        qty_on_hand: 3,
        language: Some("English".to_string()),
        genres: vec!["Science Fiction".to_string()],
        metadata: json!({}),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid, owner: UserUuid) -> Cart {
    Cart {
        uuid,
        owner_uuid: owner,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line(title: &str, unit_price: u64, quantity: u32) -> CartLine {
    CartLine {
        book_uuid: bibliotek_app::domain::books::models::BookUuid::new(),
        title: title.to_string(),
        unit_price,
        quantity,
        added_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_view(uuid: CartUuid, owner: UserUuid, lines: Vec<CartLine>) -> CartView {
    CartView {
        cart: make_cart(uuid, owner),
        lines,
    }
}

pub(crate) fn make_summary(cart_uuid: CartUuid, lines: &[CartLine]) -> CartSummary {
    CartSummary::of(cart_uuid, lines)
}

pub(crate) fn make_loaned_copy(uuid: CopyUuid, title: &str) -> LoanedCopy {
    LoanedCopy {
        copy: make_copy(uuid),
        title: title.to_string(),
    }
}

pub(crate) fn make_copy(uuid: CopyUuid) -> BookCopy {
    BookCopy {
        uuid,
        book_uuid: bibliotek_app::domain::books::models::BookUuid::new(),
        imprint: "Ace Books, 1990".to_string(),
        status: CopyStatus::OnLoan,
        due_back: Some(jiff::civil::date(2026, 9, 15)),
        borrower_uuid: Some(TEST_USER_UUID),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
