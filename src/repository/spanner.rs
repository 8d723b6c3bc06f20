use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert_or_update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use std::future::Future;
use std::sync::Arc;

use super::ItemRepository;
use crate::config::SpannerConfig;
use crate::models::Item;

const COLUMNS: [&str; 5] = ["user_id", "item_id", "value", "created_at", "updated_at"];

/// Item store backed by a Spanner table keyed by `(user_id, item_id)`
#[derive(Clone)]
pub struct SpannerItemRepository {
    inner: Arc<Client>,
    table: String,
}

impl SpannerItemRepository {
    /// Connect to Spanner and make sure the items table exists
    ///
    /// The gcloud-spanner library picks up SPANNER_EMULATOR_HOST from the
    /// environment and connects to the emulator when it is set. The instance,
    /// database and table are created if missing.
    pub async fn from_config(config: &SpannerConfig, table: &str) -> Result<Self> {
        auto_provision(config, table).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
            table: table.to_string(),
        })
    }

    fn select_sql(&self, filter: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {}",
            COLUMNS.join(", "),
            self.table,
            filter
        )
    }
}

fn row_to_item(row: &Row) -> Result<Item> {
    Ok(Item {
        user_id: row.column_by_name("user_id")?,
        item_id: row.column_by_name("item_id")?,
        value: row.column_by_name("value")?,
        created_at: row.column_by_name("created_at")?,
        updated_at: row.column_by_name("updated_at")?,
    })
}

#[async_trait]
impl ItemRepository for SpannerItemRepository {
    async fn put(&self, user_id: &str, item_id: &str, value: &str, now: i64) -> Result<Item> {
        let user_id = user_id.to_string();
        let item_id = item_id.to_string();
        let value = value.to_string();

        let mutation = insert_or_update(
            &self.table,
            &COLUMNS,
            &[&user_id, &item_id, &value, &now, &now],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to put item to Spanner")?;

        tracing::debug!("Put item {} for user {}", item_id, user_id);
        Ok(Item {
            user_id,
            item_id,
            value,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, user_id: &str, item_id: &str) -> Result<Option<Item>> {
        let sql = self.select_sql("user_id = @user_id AND item_id = @item_id");
        let mut statement = Statement::new(&sql);
        statement.add_param("user_id", &user_id.to_string());
        statement.add_param("item_id", &item_id.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query item from Spanner")?;

        if let Some(row) = result_set.next().await? {
            tracing::debug!("Read item {} for user {}", item_id, user_id);
            Ok(Some(row_to_item(&row)?))
        } else {
            tracing::debug!("Item {} not found for user {}", item_id, user_id);
            Ok(None)
        }
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Item>> {
        let sql = self.select_sql("user_id = @user_id");
        let mut statement = Statement::new(&sql);
        statement.add_param("user_id", &user_id.to_string());

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to list items from Spanner")?;

        let mut items = Vec::new();
        while let Some(row) = result_set.next().await? {
            items.push(row_to_item(&row)?);
        }

        tracing::debug!("Listed {} items for user {}", items.len(), user_id);
        Ok(items)
    }

    async fn delete(&self, user_id: &str, item_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let item_id = item_id.to_string();

        // Deleting a missing key is a no-op in Spanner.
        let mutation = delete(&self.table, Key::composite(&[&user_id, &item_id]));

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete item from Spanner")?;

        tracing::debug!("Deleted item {} for user {}", item_id, user_id);
        Ok(())
    }

    /// Run `SELECT 1` to verify the database is reachable
    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

/// Create the Spanner instance, database, and items table if they are missing
///
/// Enables zero-setup local development against the emulator.
async fn auto_provision(config: &SpannerConfig, table: &str) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path, table).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Run `create` when `lookup` reports the resource as missing
///
/// Any lookup failure other than `NotFound` is returned as an error.
async fn get_or_create<T, F, Fut>(
    kind: &str,
    name: &str,
    lookup: std::result::Result<T, Status>,
    create: F,
) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    match lookup {
        Ok(_) => {
            tracing::info!("{} already exists: {}", kind, name);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("{} not found, creating: {}", kind, name);
            create().await?;
            tracing::info!("{} created successfully: {}", kind, name);
            Ok(())
        }
        Err(status) => Err(anyhow::anyhow!(
            "Failed to check {} existence: {}",
            kind.to_lowercase(),
            status.message()
        )),
    }
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let lookup = admin_client
        .instance()
        .get_instance(
            GetInstanceRequest {
                name: instance_path.to_string(),
                field_mask: None,
            },
            None,
        )
        .await;

    // The emulator only accepts its own instance config.
    let instance_config = match &config.emulator_host {
        Some(_) => format!("{project_path}/instanceConfigs/emulator-config"),
        None => format!("{project_path}/instanceConfigs/regional-{}", config.region),
    };
    let request = CreateInstanceRequest {
        parent: project_path.to_string(),
        instance_id: config.instance.clone(),
        instance: Some(Instance {
            name: instance_path.to_string(),
            config: instance_config,
            display_name: format!("{} instance", config.instance),
            node_count: 1,
            ..Default::default()
        }),
    };

    get_or_create("Instance", instance_path, lookup, move || async move {
        admin_client
            .instance()
            .create_instance(request, None)
            .await
            .context("Failed to start instance creation")?
            .wait(None)
            .await
            .context("Failed to create instance")?;
        Ok(())
    })
    .await
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let lookup = admin_client
        .database()
        .get_database(
            GetDatabaseRequest {
                name: database_path.to_string(),
            },
            None,
        )
        .await;

    let database_id = database_path
        .rsplit('/')
        .next()
        .context("Invalid database path")?;
    let request = CreateDatabaseRequest {
        parent: instance_path.to_string(),
        create_statement: format!("CREATE DATABASE `{database_id}`"),
        extra_statements: vec![],
        encryption_config: None,
        database_dialect: 1, // Google Standard SQL
        proto_descriptors: vec![],
    };

    get_or_create("Database", database_path, lookup, move || async move {
        admin_client
            .database()
            .create_database(request, None)
            .await
            .context("Failed to start database creation")?
            .wait(None)
            .await
            .context("Failed to create database")?;
        Ok(())
    })
    .await
}

fn create_table_ddl(table: &str) -> String {
    format!(
        r#"CREATE TABLE {table} (
    user_id STRING(MAX) NOT NULL,
    item_id STRING(MAX) NOT NULL,
    value STRING(MAX) NOT NULL,
    created_at INT64 NOT NULL,
    updated_at INT64 NOT NULL,
) PRIMARY KEY (user_id, item_id)"#
    )
}

fn ddl_defines_table(statements: &[String], table: &str) -> bool {
    let plain = format!("CREATE TABLE {table} ");
    let quoted = format!("CREATE TABLE `{table}` ");
    statements
        .iter()
        .any(|stmt| stmt.starts_with(&plain) || stmt.starts_with(&quoted))
}

async fn ensure_table_exists(
    admin_client: &AdminClient,
    database_path: &str,
    table: &str,
) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    if ddl_defines_table(&ddl_response.into_inner().statements, table) {
        tracing::info!("Table '{}' already exists", table);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", table);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![create_table_ddl(table)],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", table);
    Ok(())
}
