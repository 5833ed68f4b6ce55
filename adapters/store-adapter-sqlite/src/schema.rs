//! Database schema initialization and migrations
//!
//! The unique indexes here are load-bearing: owner email / national id /
//! tenant id and the `(tenant_id, email)` client pair must be rejected by
//! the storage layer, not only by application pre-checks.

use sqlx::{Sqlite, SqlitePool, Transaction};

/// Get the current database version from vars table
async fn get_db_version(tx: &mut Transaction<'_, Sqlite>) -> i64 {
	sqlx::query_scalar::<_, String>("SELECT value FROM vars WHERE key = 'db_version'")
		.fetch_optional(&mut **tx)
		.await
		.ok()
		.flatten()
		.and_then(|v| v.parse().ok())
		.unwrap_or(0)
}

/// Set the database version in vars table
async fn set_db_version(tx: &mut Transaction<'_, Sqlite>, version: i64) {
	let _ = sqlx::query("INSERT OR REPLACE INTO vars (key, value) VALUES ('db_version', ?)")
		.bind(version.to_string())
		.execute(&mut **tx)
		.await;
}

// Current schema version - update this when adding new migrations
const CURRENT_DB_VERSION: i64 = 1;

/// Initialize the database schema and run migrations
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Create vars table first (needed for version tracking)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS vars (
			key text NOT NULL,
			value text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(key)
		)",
	)
	.execute(&mut *tx)
	.await?;

	let version = get_db_version(&mut tx).await;

	// Schema creation - safe to run every time (uses IF NOT EXISTS)

	// Owners
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS owners (
			owner_id INTEGER PRIMARY KEY AUTOINCREMENT,
			tenant_id text NOT NULL,
			name text NOT NULL,
			email text NOT NULL,
			password text NOT NULL,
			phone text NOT NULL,
			alternate_phone text,
			national_id text NOT NULL,
			tax_id text,
			address text NOT NULL,
			city text NOT NULL,
			state text NOT NULL,
			pincode text NOT NULL,
			company_name text,
			business_type text NOT NULL DEFAULT 'Individual',
			gst_number text,
			bank_account_number text,
			ifsc_code text,
			bank_name text,
			trial_start_date INTEGER NOT NULL,
			trial_end_date INTEGER NOT NULL,
			is_trial_active INTEGER NOT NULL DEFAULT 1,
			subscription_status text NOT NULL DEFAULT 'trial',
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_owners_tenant ON owners (tenant_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_owners_email ON owners (email)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_owners_national_id ON owners (national_id)")
		.execute(&mut *tx)
		.await?;

	// Platform users (SuperAdmin)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS platform_users (
			user_id INTEGER PRIMARY KEY AUTOINCREMENT,
			email text NOT NULL,
			password text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_platform_users_email ON platform_users (email)",
	)
	.execute(&mut *tx)
	.await?;

	// Clients
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS clients (
			client_id INTEGER PRIMARY KEY AUTOINCREMENT,
			tenant_id text NOT NULL,
			name text NOT NULL,
			gender text,
			father_name text,
			address1 text,
			address2 text,
			mobile_number text,
			email text,
			password text,
			owner_id INTEGER NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			FOREIGN KEY (owner_id) REFERENCES owners(owner_id)
		)",
	)
	.execute(&mut *tx)
	.await?;
	// Same email may recur across tenants, never within one
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_clients_tenant_email ON clients (tenant_id, email)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_clients_tenant ON clients (tenant_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_clients_email ON clients (email)")
		.execute(&mut *tx)
		.await?;

	// Properties
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS properties (
			property_id INTEGER PRIMARY KEY AUTOINCREMENT,
			tenant_id text NOT NULL,
			pincode text NOT NULL,
			address1 text NOT NULL,
			address2 text NOT NULL,
			city text NOT NULL,
			state text NOT NULL,
			owner_id INTEGER NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			FOREIGN KEY (owner_id) REFERENCES owners(owner_id)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_properties_tenant ON properties (tenant_id)")
		.execute(&mut *tx)
		.await?;

	// Rent agreements (decimal terms stored as text, never as float)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS agreements (
			agreement_id INTEGER PRIMARY KEY AUTOINCREMENT,
			tenant_id text NOT NULL,
			electricity_meter_number text NOT NULL,
			monthly_rent text NOT NULL,
			security_deposit_amount text NOT NULL,
			increment_percentage text NOT NULL,
			increment_schedule text NOT NULL,
			payment_date text,
			payment_mode text NOT NULL,
			client_id INTEGER NOT NULL,
			property_id INTEGER NOT NULL,
			owner_id INTEGER NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			FOREIGN KEY (client_id) REFERENCES clients(client_id),
			FOREIGN KEY (property_id) REFERENCES properties(property_id),
			FOREIGN KEY (owner_id) REFERENCES owners(owner_id)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_agreements_tenant ON agreements (tenant_id)")
		.execute(&mut *tx)
		.await?;

	// Rent transactions
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS transactions (
			transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
			tenant_id text NOT NULL,
			rent_from text NOT NULL,
			rent_to text NOT NULL,
			payment_threshold text NOT NULL,
			payment_mode text NOT NULL,
			client_id INTEGER NOT NULL,
			property_id INTEGER NOT NULL,
			agreement_id INTEGER NOT NULL,
			owner_id INTEGER NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			FOREIGN KEY (client_id) REFERENCES clients(client_id),
			FOREIGN KEY (property_id) REFERENCES properties(property_id),
			FOREIGN KEY (agreement_id) REFERENCES agreements(agreement_id),
			FOREIGN KEY (owner_id) REFERENCES owners(owner_id)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_tenant ON transactions (tenant_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_client ON transactions (client_id)")
		.execute(&mut *tx)
		.await?;

	// Triggers for automatic updated_at on UPDATE
	for table_key in [
		("owners", "owner_id"),
		("platform_users", "user_id"),
		("clients", "client_id"),
		("properties", "property_id"),
		("agreements", "agreement_id"),
		("transactions", "transaction_id"),
	] {
		let (table, key) = table_key;
		sqlx::query(&format!(
			"CREATE TRIGGER IF NOT EXISTS {table}_updated_at AFTER UPDATE ON {table} FOR EACH ROW \
			BEGIN UPDATE {table} SET updated_at = unixepoch() WHERE {key} = NEW.{key}; END",
		))
		.execute(&mut *tx)
		.await?;
	}

	// Fresh database: schema above is already current
	if version == 0 {
		set_db_version(&mut tx, CURRENT_DB_VERSION).await;
	}

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
