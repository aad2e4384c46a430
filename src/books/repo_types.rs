use sqlx::FromRow;
use time::Date;

#[derive(Debug, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_date: Date,
    pub user_id: i64,
}

/// A book owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub author: String,
    pub published_date: Date,
}

/// Validated fields for creating or fully replacing a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_date: Date,
}

impl From<BookRow> for Book {
    fn from(r: BookRow) -> Self {
        Self {
            id: r.id,
            owner_id: r.user_id,
            title: r.title,
            author: r.author,
            published_date: r.published_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn row_maps_user_id_to_owner() {
        let book = Book::from(BookRow {
            id: 3,
            title: "Dune".into(),
            author: "Herbert".into(),
            published_date: date!(1965 - 08 - 01),
            user_id: 9,
        });
        assert_eq!(book.id, 3);
        assert_eq!(book.owner_id, 9);
        assert_eq!(book.published_date, date!(1965 - 08 - 01));
    }
}
