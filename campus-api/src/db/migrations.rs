//! Schema bootstrap for every record shape
//!
//! Tables are created in dependency order (referenced tables first) and
//! dropped in the reverse order. Every table starts with the shared base
//! columns and gets an index on `deleted_at` plus each id column.
//!
//! Only structural links carry a `REFERENCES` constraint: departments and
//! sessions to universities, batches to departments and sessions, and the
//! student/teacher/staff profiles to their user (plus students to batches).
//! Every other id column is a plain indexed UUID, so study material can name
//! a department or teacher that isn't stored here.

use sqlx::PgPool;

use crate::models::{
    Batch, Book, Department, Entity, Note, Question, Session, Staff, Student, Syllabus,
    Teacher, Transport, University, User, Verification,
};

const BASE_COLUMNS: &str = "
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ";

/// One table's resource-specific DDL
struct TableDef {
    table: &'static str,
    columns: &'static str,
    /// Columns that get a plain btree index
    indexed: &'static [&'static str],
}

/// Creation order: every table appears after the tables it references.
const TABLES: &[TableDef] = &[
    TableDef {
        table: University::TABLE,
        columns: "
            name VARCHAR(255) NOT NULL UNIQUE,
            acronym VARCHAR(20) NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            website VARCHAR(255) NOT NULL DEFAULT '',
            logo_url TEXT NOT NULL DEFAULT ''",
        indexed: &["acronym"],
    },
    TableDef {
        table: Department::TABLE,
        columns: "
            name VARCHAR(255) NOT NULL,
            code VARCHAR(20) NOT NULL DEFAULT '',
            university_id UUID NOT NULL REFERENCES universities(id),
            semesters INTEGER NOT NULL DEFAULT 0",
        indexed: &["university_id"],
    },
    TableDef {
        table: Session::TABLE,
        columns: "
            name VARCHAR(50) NOT NULL,
            university_id UUID NOT NULL REFERENCES universities(id),
            is_active BOOLEAN NOT NULL DEFAULT TRUE",
        indexed: &["university_id"],
    },
    TableDef {
        table: Batch::TABLE,
        columns: "
            name VARCHAR(100) NOT NULL,
            department_id UUID NOT NULL REFERENCES departments(id),
            session_id UUID NOT NULL REFERENCES sessions(id)",
        indexed: &["department_id", "session_id"],
    },
    TableDef {
        table: User::TABLE,
        columns: "
            email TEXT NOT NULL UNIQUE,
            role VARCHAR(20) NOT NULL DEFAULT 'student',
            first_name VARCHAR(100) NOT NULL DEFAULT '',
            last_name VARCHAR(100) NOT NULL DEFAULT '',
            phone VARCHAR(20) NOT NULL DEFAULT '',
            avatar_url TEXT NOT NULL DEFAULT '',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            is_verified BOOLEAN NOT NULL DEFAULT FALSE,
            university_id UUID,
            department_id UUID",
        indexed: &["university_id", "department_id"],
    },
    TableDef {
        table: Student::TABLE,
        columns: "
            user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
            batch_id UUID NOT NULL REFERENCES batches(id),
            roll_number VARCHAR(50) NOT NULL DEFAULT '',
            reg_number VARCHAR(50) NOT NULL DEFAULT '',
            is_cr BOOLEAN NOT NULL DEFAULT FALSE",
        indexed: &["batch_id", "roll_number", "reg_number"],
    },
    TableDef {
        table: Teacher::TABLE,
        columns: "
            user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
            department_id UUID NOT NULL,
            designation VARCHAR(100) NOT NULL DEFAULT ''",
        indexed: &["department_id"],
    },
    TableDef {
        table: Staff::TABLE,
        columns: "
            user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
            university_id UUID NOT NULL,
            position VARCHAR(100) NOT NULL DEFAULT ''",
        indexed: &["university_id"],
    },
    TableDef {
        table: Verification::TABLE,
        columns: "
            user_id UUID NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            document_url TEXT NOT NULL DEFAULT ''",
        indexed: &["user_id"],
    },
    TableDef {
        table: Book::TABLE,
        columns: "
            title VARCHAR(255) NOT NULL,
            author VARCHAR(255) NOT NULL DEFAULT '',
            edition TEXT NOT NULL DEFAULT '',
            department_id UUID,
            university_id UUID,
            download_url TEXT NOT NULL DEFAULT '',
            physical_location TEXT NOT NULL DEFAULT ''",
        indexed: &["department_id", "university_id"],
    },
    TableDef {
        table: Question::TABLE,
        columns: "
            subject VARCHAR(255) NOT NULL,
            year INTEGER NOT NULL DEFAULT 0,
            semester TEXT NOT NULL DEFAULT '',
            department_id UUID,
            university_id UUID,
            download_url TEXT NOT NULL DEFAULT ''",
        indexed: &["department_id", "university_id"],
    },
    TableDef {
        table: Note::TABLE,
        columns: "
            title VARCHAR(255) NOT NULL,
            subject TEXT NOT NULL DEFAULT '',
            topic TEXT NOT NULL DEFAULT '',
            teacher_id UUID,
            department_id UUID,
            university_id UUID,
            download_url TEXT NOT NULL DEFAULT ''",
        indexed: &["teacher_id", "department_id", "university_id"],
    },
    TableDef {
        table: Syllabus::TABLE,
        columns: "
            session_id UUID,
            department_id UUID,
            university_id UUID,
            download_url TEXT NOT NULL DEFAULT ''",
        indexed: &["session_id", "department_id", "university_id"],
    },
    TableDef {
        table: Transport::TABLE,
        columns: "
            university_id UUID NOT NULL,
            route_name VARCHAR(100) NOT NULL,
            bus_number TEXT NOT NULL DEFAULT '',
            schedule TEXT NOT NULL DEFAULT '',
            driver_contact TEXT NOT NULL DEFAULT ''",
        indexed: &["university_id"],
    },
];

fn create_table_sql(def: &TableDef) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({},{}\n)",
        def.table, BASE_COLUMNS, def.columns
    )
}

fn index_sql(table: &str, column: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table}({column})",
        table = table,
        column = column
    )
}

/// Create every table and index that doesn't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    for def in TABLES {
        sqlx::query(&create_table_sql(def)).execute(pool).await?;

        for column in std::iter::once(&"deleted_at").chain(def.indexed) {
            sqlx::query(&index_sql(def.table, column))
                .execute(pool)
                .await?;
        }
    }

    tracing::info!(tables = TABLES.len(), "Schema migrations complete");
    Ok(())
}

/// Drop every table, dependents first. Data is lost.
pub async fn drop_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    for def in TABLES.iter().rev() {
        tracing::info!(table = def.table, "Dropping table");
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", def.table))
            .execute(pool)
            .await?;
    }
    Ok(())
}
