//! Command handlers. Each one drives the shared controllers from
//! `resources` and prints the outcome.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::io::Write;
use std::path::{Path, PathBuf};

use resources::mutation::{self, FormErrors, LoginForm, RegisterForm};
use resources::table::{self, SortDirection, TableState};
use resources::{AnyForm, Operation, Record, Resource, ResourceKind, ResourceList, Upload};
use serde_json::Value;

use crate::{App, AssetSubcommand, CliError, Command, ExportArgs, ListArgs, render};

pub async fn run(app: &mut App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => login(app, LoginForm { email, password }).await,
        Command::Register { name, email, password } => {
            let form = RegisterForm {
                name,
                email,
                password_confirmation: password.clone(),
                password,
            };
            register(app, form).await
        }
        Command::Logout => {
            app.session.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => whoami(app),
        Command::List(args) => list(app, args).await,
        Command::Get { resource, id, json } => get(app, resource, id, json).await,
        Command::Create(args) => create(app, args.resource, &args.data, &args.files).await,
        Command::Update {
            resource,
            id,
            data,
            files,
        } => update(app, resource, id, &data, &files).await,
        Command::Delete { resource, ids } => delete(app, resource, &ids).await,
        Command::Bookings { json } => my_bookings(app, json).await,
        Command::Export(args) => export(app, args).await,
        Command::Asset(asset) => match asset.command {
            AssetSubcommand::Upload { resource, id, files } => upload(app, resource, id, &files).await,
            AssetSubcommand::Delete { url } => {
                app.client.delete_asset(&url).await?;
                println!("Asset deleted.");
                Ok(())
            }
        },
    }
}

// =============================================================================
// AUTH
// =============================================================================

async fn login(app: &mut App, form: LoginForm) -> Result<(), CliError> {
    check(&form.validate())?;
    let session = app.client.login(form.email.trim(), &form.password).await?;
    app.session.login(session)?;
    app.client.set_token(app.session.token().map(ToOwned::to_owned));
    whoami(app)
}

async fn register(app: &mut App, form: RegisterForm) -> Result<(), CliError> {
    check(&form.validate())?;
    match app.client.register(&form).await? {
        Some(session) => {
            app.session.login(session)?;
            whoami(app)
        }
        None => {
            println!("Account created. Sign in with `tourdesk login`.");
            Ok(())
        }
    }
}

fn whoami(app: &App) -> Result<(), CliError> {
    let user = app.session.user().ok_or(CliError::NotSignedIn)?;
    let role = user.role.as_deref().unwrap_or("customer");
    println!("{} <{}> ({role})", user.name, user.email);
    Ok(())
}

// =============================================================================
// READ
// =============================================================================

async fn fetch(app: &App, kind: ResourceKind) -> Result<ResourceList, CliError> {
    let mut list = ResourceList::new(kind);
    list.refetch(&app.client).await;
    if let Some(err) = list.state().error() {
        return Err(CliError::List(err.clone()));
    }
    Ok(list)
}

async fn list(app: &App, args: ListArgs) -> Result<(), CliError> {
    let kind = args.resource;
    let mut list = fetch(app, kind).await?;
    apply_query(&mut list.table, kind, args.filter.as_deref(), args.sort.as_deref(), args.desc)?;
    list.table.set_page_size(args.page_size)?;
    list.table.set_page(args.page.saturating_sub(1));

    let view = list.view();
    if args.json {
        return print_json(&render::rows_json(kind.columns(), &view.rows));
    }
    if view.rows.is_empty() {
        println!("No {} found.", kind.label().to_lowercase());
        return Ok(());
    }
    print!("{}", render::table(kind.columns(), &view.rows));
    if args.expand {
        for record in &view.rows {
            println!();
            print!("{}", render::details(record, app.base_url()));
        }
    }
    println!("{}", render::page_footer(&view));
    Ok(())
}

async fn get(app: &App, kind: ResourceKind, id: i64, json: bool) -> Result<(), CliError> {
    let detail = app.client.get_kind(kind, id).await?;
    if json {
        return print_json(&detail);
    }
    let records = kind.decode_records(&detail).map_err(resources::ApiError::from)?;
    for record in &records {
        print!("{}", render::table(kind.columns(), &[record]));
        print!("{}", render::details(record, app.base_url()));
    }
    Ok(())
}

async fn my_bookings(app: &App, json: bool) -> Result<(), CliError> {
    if !app.session.is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    let bookings = app.client.my_bookings().await?;
    let records: Vec<Record> = bookings.iter().map(Resource::to_record).collect();
    let rows: Vec<&Record> = records.iter().collect();
    let columns = ResourceKind::Booking.columns();
    if json {
        return print_json(&render::rows_json(columns, &rows));
    }
    if rows.is_empty() {
        println!("You have no bookings yet.");
        return Ok(());
    }
    print!("{}", render::table(columns, &rows));
    Ok(())
}

async fn export(app: &App, args: ExportArgs) -> Result<(), CliError> {
    let kind = args.resource;
    let mut list = fetch(app, kind).await?;
    apply_query(&mut list.table, kind, args.filter.as_deref(), args.sort.as_deref(), args.desc)?;
    for &id in &args.ids {
        list.table.toggle_selected(id);
    }

    let rows = list.table.selected_or_all(list.records());
    let csv = table::to_csv(&table::export_rows(kind.columns(), &rows));
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, csv).await.map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            eprintln!("Exported {} rows to {}.", rows.len(), path.display());
        }
        None => std::io::stdout()
            .write_all(csv.as_bytes())
            .map_err(CliError::Stdout)?,
    }
    Ok(())
}

// =============================================================================
// WRITE
// =============================================================================

async fn create(app: &App, kind: ResourceKind, data: &str, files: &[PathBuf]) -> Result<(), CliError> {
    let body = parse_data(data).await?;
    let form = AnyForm::from_json(kind, &body)?;
    let uploads = read_uploads(files).await?;
    let outcome = mutation::submit(&app.client, Operation::Create, &form, uploads).await?;
    match outcome.id {
        Some(id) => println!("{} (id {id})", outcome.toast.message),
        None => println!("{}", outcome.toast.message),
    }
    Ok(())
}

/// The stored record is the base; keys in `data` replace its fields, so
/// the PUT always carries the whole record.
async fn update(app: &App, kind: ResourceKind, id: i64, data: &str, files: &[PathBuf]) -> Result<(), CliError> {
    let overlay = parse_data(data).await?;
    let detail = app.client.get_kind(kind, id).await?;
    let mut body = AnyForm::from_entity(kind, &detail)?.to_json()?;
    merge(&mut body, overlay);
    let form = AnyForm::from_json(kind, &body)?;
    let uploads = read_uploads(files).await?;
    let outcome = mutation::submit(&app.client, Operation::Update(id), &form, uploads).await?;
    println!("{}", outcome.toast.message);
    Ok(())
}

async fn delete(app: &App, kind: ResourceKind, ids: &[i64]) -> Result<(), CliError> {
    let mut list = ResourceList::new(kind);
    list.delete(&app.client, ids).await.map_err(CliError::List)?;
    println!("{}", mutation::deleted_toast(kind, ids.len()).message);
    if list.state().error().is_none() {
        println!("{} {} remaining.", list.records().len(), kind.label().to_lowercase());
    }
    Ok(())
}

async fn upload(app: &App, kind: ResourceKind, id: i64, files: &[PathBuf]) -> Result<(), CliError> {
    let uploads = read_uploads(files).await?;
    let count = uploads.len();
    app.client.upload_assets(kind, id, uploads).await?;
    println!("Uploaded {count} file(s) to {} #{id}.", kind.singular().to_lowercase());
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn print_json(value: &Value) -> Result<(), CliError> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{pretty}");
    Ok(())
}

fn check(errors: &FormErrors) -> Result<(), CliError> {
    if errors.is_empty() {
        return Ok(());
    }
    let lines: Vec<String> = errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect();
    Err(CliError::Validation(lines.join("\n")))
}

fn apply_query(
    state: &mut TableState,
    kind: ResourceKind,
    filter: Option<&str>,
    sort: Option<&str>,
    desc: bool,
) -> Result<(), CliError> {
    if let Some(raw) = filter {
        let (column, query) = parse_filter(kind, raw)?;
        state.set_filter_column(&column);
        state.set_filter(&query);
    }
    if let Some(column) = sort {
        sort_column(kind, column)?;
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        state.set_sort(column, direction);
    }
    Ok(())
}

/// `column=query`, or a bare query against the kind's search column.
pub(crate) fn parse_filter(kind: ResourceKind, raw: &str) -> Result<(String, String), CliError> {
    let Some((column, query)) = raw.split_once('=') else {
        return Ok((kind.filter_column().to_owned(), raw.to_owned()));
    };
    let column = column.trim();
    if column.is_empty() {
        return Err(CliError::InvalidFilter(raw.to_owned()));
    }
    if !kind.columns().iter().any(|c| c.key == column) {
        return Err(CliError::UnknownColumn {
            kind,
            column: column.to_owned(),
        });
    }
    Ok((column.to_owned(), query.to_owned()))
}

pub(crate) fn sort_column(kind: ResourceKind, column: &str) -> Result<(), CliError> {
    match kind.columns().iter().find(|c| c.key == column) {
        Some(c) if c.sortable => Ok(()),
        Some(_) => Err(CliError::UnsortableColumn {
            kind,
            column: column.to_owned(),
        }),
        None => Err(CliError::UnknownColumn {
            kind,
            column: column.to_owned(),
        }),
    }
}

/// Shallow merge: top-level keys of `overlay` replace those in `base`.
pub(crate) fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => base.extend(overlay),
        (base, overlay) => *base = overlay,
    }
}

async fn parse_data(raw: &str) -> Result<Value, CliError> {
    let text = match raw.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CliError::Io {
                path: PathBuf::from(path),
                source,
            })?,
        None => raw.to_owned(),
    };
    let value: Value = serde_json::from_str(&text)?;
    if !value.is_object() {
        return Err(CliError::NotAnObject);
    }
    Ok(value)
}

async fn read_uploads(files: &[PathBuf]) -> Result<Vec<Upload>, CliError> {
    let mut uploads = Vec::with_capacity(files.len());
    for path in files {
        let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        uploads.push(Upload {
            file_name,
            mime: guess_mime(path).to_owned(),
            bytes,
        });
    }
    Ok(uploads)
}

pub(crate) fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
