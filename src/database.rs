// ABOUTME: SQLite persistence layer for users, meal plans and day rows
// ABOUTME: Plan header and all day rows commit in a single transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

//! # Database Management
//!
//! User storage and the plan repository over one sqlx SQLite pool. Creating
//! a plan writes the header row and every day row inside one transaction, so
//! a failure at any point commits nothing. Reads reassemble a plan with its
//! days ordered by day index.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::models::{DayMeals, MealDay, MealPlan, MealSlot, User};

/// Database manager for user and meal plan storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    /// Returns an error if the connection or a migration statement fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains("mode=")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Cheap connectivity check used by the readiness endpoint
    ///
    /// # Errors
    /// Returns an error if the pool cannot execute a trivial query.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    /// Returns an error if a schema statement fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT,
                google_id TEXT,
                trial_start TEXT NOT NULL,
                is_subscribed BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meal_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                start_date TEXT NOT NULL,
                duration INTEGER NOT NULL CHECK (duration >= 1),
                goal TEXT NOT NULL,
                diet TEXT NOT NULL,
                allergies TEXT NOT NULL DEFAULT '',
                health_conditions TEXT NOT NULL DEFAULT '',
                lifestyle TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meal_plans_user ON meal_plans(user_id)")
            .execute(&self.pool)
            .await?;

        // Meal slots are JSON-typed columns; (plan_id, day) is unique so day
        // indices stay contiguous per plan
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meal_days (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL,
                day INTEGER NOT NULL CHECK (day >= 1),
                date TEXT NOT NULL,
                breakfast TEXT NOT NULL,
                lunch TEXT NOT NULL,
                snacks TEXT NOT NULL,
                dinner TEXT NOT NULL,
                cheat_day BOOLEAN NOT NULL DEFAULT 0,
                UNIQUE (plan_id, day),
                FOREIGN KEY (plan_id) REFERENCES meal_plans (id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meal_days_plan ON meal_days(plan_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ================================
    // User Management
    // ================================

    /// Create a new user account
    ///
    /// # Errors
    /// Returns an error if the email is already taken or the write fails.
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, google_id, trial_start, is_subscribed, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.google_id)
        .bind(user.trial_start.to_rfc3339())
        .bind(user.is_subscribed)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    /// Get user by ID
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Get user by email
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Link a Google subject id to an existing account
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub async fn set_google_id(&self, user_id: Uuid, google_id: &str) -> Result<()> {
        sqlx::query("UPDATE users SET google_id = ?1 WHERE id = ?2")
            .bind(google_id)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Set the subscription flag; returns false when the user does not exist
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub async fn set_subscribed(&self, user_id: Uuid, subscribed: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_subscribed = ?1 WHERE id = ?2")
            .bind(subscribed)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of plans a user has created
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn count_plans_for_user(&self, user_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM meal_plans WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    // ================================
    // Plan Repository
    // ================================

    /// Persist a plan header and its day rows as one logical unit
    ///
    /// Either every row commits or none do. Returns the plan id.
    ///
    /// # Errors
    /// Returns an error if any insert fails; the transaction rolls back.
    pub async fn create_plan_with_days(
        &self,
        plan: &MealPlan,
        days: &[MealDay],
    ) -> Result<Uuid> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO meal_plans (id, user_id, title, start_date, duration, goal, diet,
                                    allergies, health_conditions, lifestyle, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(&plan.title)
        .bind(plan.start_date.to_string())
        .bind(plan.duration)
        .bind(&plan.goal)
        .bind(&plan.diet)
        .bind(&plan.allergies)
        .bind(&plan.health_conditions)
        .bind(&plan.lifestyle)
        .bind(plan.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        for day in days {
            sqlx::query(
                r#"
                INSERT INTO meal_days (id, plan_id, day, date, breakfast, lunch, snacks, dinner, cheat_day)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(day.id.to_string())
            .bind(day.plan_id.to_string())
            .bind(day.day)
            .bind(day.date.to_string())
            .bind(serde_json::to_string(&day.meals.breakfast)?)
            .bind(serde_json::to_string(&day.meals.lunch)?)
            .bind(serde_json::to_string(&day.meals.snacks)?)
            .bind(serde_json::to_string(&day.meals.dinner)?)
            .bind(day.cheat_day)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(plan.id)
    }

    /// Load a plan header with its days ordered by day index
    ///
    /// # Errors
    /// Returns an error if a query fails or stored data is corrupt.
    pub async fn get_plan_with_days(
        &self,
        plan_id: Uuid,
    ) -> Result<Option<(MealPlan, Vec<MealDay>)>> {
        let row = sqlx::query("SELECT * FROM meal_plans WHERE id = ?1")
            .bind(plan_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let plan = row_to_plan(&row)?;

        let day_rows = sqlx::query("SELECT * FROM meal_days WHERE plan_id = ?1 ORDER BY day ASC")
            .bind(plan_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        let days = day_rows
            .iter()
            .map(row_to_day)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some((plan, days)))
    }

    /// List plan headers owned by a user, in insertion order
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_plans_for_user(&self, user_id: Uuid) -> Result<Vec<MealPlan>> {
        let rows = sqlx::query("SELECT * FROM meal_plans WHERE user_id = ?1")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_plan).collect()
    }

    /// Set or clear a day's cheat flag; idempotent
    ///
    /// Returns false when no day matches, without mutating anything.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub async fn set_cheat_day(&self, plan_id: Uuid, day: i32, cheat: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE meal_days SET cheat_day = ?1 WHERE plan_id = ?2 AND day = ?3")
            .bind(cheat)
            .bind(plan_id.to_string())
            .bind(day)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

fn row_to_user(row: &SqliteRow) -> Result<User> {
    let id_str: String = row.try_get("id")?;
    let trial_start_str: String = row.try_get("trial_start")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(User {
        id: Uuid::parse_str(&id_str)?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        google_id: row.try_get("google_id")?,
        trial_start: parse_timestamp(&trial_start_str)?,
        is_subscribed: row.try_get("is_subscribed")?,
        created_at: parse_timestamp(&created_at_str)?,
    })
}

fn row_to_plan(row: &SqliteRow) -> Result<MealPlan> {
    let id_str: String = row.try_get("id")?;
    let user_id_str: String = row.try_get("user_id")?;
    let start_date_str: String = row.try_get("start_date")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(MealPlan {
        id: Uuid::parse_str(&id_str)?,
        user_id: Uuid::parse_str(&user_id_str)?,
        title: row.try_get("title")?,
        start_date: start_date_str.parse::<NaiveDate>()?,
        duration: row.try_get("duration")?,
        goal: row.try_get("goal")?,
        diet: row.try_get("diet")?,
        allergies: row.try_get("allergies")?,
        health_conditions: row.try_get("health_conditions")?,
        lifestyle: row.try_get("lifestyle")?,
        created_at: parse_timestamp(&created_at_str)?,
    })
}

fn row_to_day(row: &SqliteRow) -> Result<MealDay> {
    let id_str: String = row.try_get("id")?;
    let plan_id_str: String = row.try_get("plan_id")?;
    let date_str: String = row.try_get("date")?;

    let slot = |column: &str| -> Result<MealSlot> {
        let raw: String = row.try_get(column)?;
        Ok(serde_json::from_str(&raw)?)
    };

    Ok(MealDay {
        id: Uuid::parse_str(&id_str)?,
        plan_id: Uuid::parse_str(&plan_id_str)?,
        day: row.try_get("day")?,
        date: date_str.parse::<NaiveDate>()?,
        meals: DayMeals {
            breakfast: slot("breakfast")?,
            lunch: slot("lunch")?,
            snacks: slot("snacks")?,
            dinner: slot("dinner")?,
        },
        cheat_day: row.try_get("cheat_day")?,
    })
}
