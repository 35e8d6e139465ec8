use serde_json::Value;

use crate::domain::{
    BookInput, BookRepository, DomainError, RegisterInput, ReviewInput, UserId, UserRepository,
};
use crate::infrastructure::AppState;
use crate::services::{book_service, review_service, user_service};

const DEMO_PASSWORD: &str = "password";

struct DemoBook {
    title: &'static str,
    author: &'static str,
    genre: &'static str,
    year: i32,
    description: &'static str,
}

const DEMO_BOOKS: &[DemoBook] = &[
    DemoBook {
        title: "Dune",
        author: "Frank Herbert",
        genre: "Science Fiction",
        year: 1965,
        description: "A desert planet, a noble house and the spice that binds the empire.",
    },
    DemoBook {
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        genre: "Fantasy",
        year: 1937,
        description: "A hobbit is swept into a quest to reclaim a dwarven kingdom.",
    },
    DemoBook {
        title: "Foundation",
        author: "Isaac Asimov",
        genre: "Science Fiction",
        year: 1951,
        description: "A mathematician plans for the fall of a galactic empire.",
    },
    DemoBook {
        title: "Pride and Prejudice",
        author: "Jane Austen",
        genre: "Classic",
        year: 1813,
        description: "Manners, marriage and misjudgement in Regency England.",
    },
    DemoBook {
        title: "Neuromancer",
        author: "William Gibson",
        genre: "Cyberpunk",
        year: 1984,
        description: "A washed-up hacker is hired for one last job.",
    },
    DemoBook {
        title: "Beloved",
        author: "Toni Morrison",
        genre: "Literary Fiction",
        year: 1987,
        description: "A formerly enslaved woman is haunted by her past.",
    },
];

/// Seed two demo accounts, a page and a bit of books, and cross reviews.
///
/// Goes through the services so every seeded row satisfies the same rules
/// as user-created data. Each step reuses what a previous run already
/// stored, so an interrupted seed is completed on the next start.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    let alice = ensure_account(state, "Alice", "alice@example.com").await?;
    let bob = ensure_account(state, "Bob", "bob@example.com").await?;

    let alice_books = state.book_repo.find_by_owner(alice).await?;
    let bob_books = state.book_repo.find_by_owner(bob).await?;

    let mut books_added = 0;
    let mut reviews_added = 0;
    for (index, demo) in DEMO_BOOKS.iter().enumerate() {
        // Alternate owners so each user has books they may review
        let (owner, reviewer, existing) = if index % 2 == 0 {
            (alice, bob, &alice_books)
        } else {
            (bob, alice, &bob_books)
        };

        let book_id = match existing.iter().find(|b| b.title == demo.title) {
            Some(book) => book.id,
            None => {
                books_added += 1;
                book_service::add_book(
                    state.book_repo.as_ref(),
                    owner,
                    BookInput {
                        title: Some(demo.title.to_owned()),
                        author: Some(demo.author.to_owned()),
                        description: Some(demo.description.to_owned()),
                        genre: Some(demo.genre.to_owned()),
                        published_year: Some(demo.year),
                    },
                )
                .await?
                .id
            }
        };

        let review = review_service::add_review(
            state.book_repo.as_ref(),
            state.review_repo.as_ref(),
            reviewer,
            book_id,
            ReviewInput {
                rating: Some(Value::from(5 - (index as i64 % 3))),
                review_text: Some(format!("{} by {} is worth a read.", demo.title, demo.author)),
            },
        )
        .await;
        match review {
            Ok(_) => reviews_added += 1,
            Err(DomainError::Conflict(_)) => {}
            Err(e) => return Err(e),
        }
    }

    if books_added == 0 && reviews_added == 0 {
        tracing::info!("Demo data already present, nothing to seed");
    } else {
        tracing::info!(
            "Seeded {} demo books and {} reviews for alice@example.com and bob@example.com",
            books_added,
            reviews_added
        );
    }
    Ok(())
}

/// Register a demo account, or look it up when it already exists
async fn ensure_account(state: &AppState, name: &str, email: &str) -> Result<UserId, DomainError> {
    let input = RegisterInput {
        name: Some(name.to_owned()),
        email: Some(email.to_owned()),
        password: Some(DEMO_PASSWORD.to_owned()),
    };

    match user_service::register(state.user_repo.as_ref(), input).await {
        Ok(auth) => Ok(auth.id),
        Err(DomainError::Conflict(_)) => state
            .user_repo
            .find_credentials(email)
            .await?
            .map(|credentials| credentials.user.id)
            .ok_or_else(|| DomainError::Internal(format!("Demo account {} vanished", email))),
        Err(e) => Err(e),
    }
}
