//! Property commands, each driving one page of the client logic.

use anyhow::Result;
use estate_client::PropertyClient;
use property_bff::{FilterField, FormField, PAGE_SIZES, Phase, PropertyBff, Route};
use serde_json::Value;

use crate::render;

pub struct ListArgs {
    pub city: Option<String>,
    pub max_price: Option<String>,
    pub min_surface: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

/// LIST: the list page with filter and pagination applied.
pub async fn list(bff: &PropertyBff, args: &ListArgs, output_json: bool) -> Result<()> {
    if !PAGE_SIZES.contains(&args.page_size) {
        anyhow::bail!("--page-size must be one of {:?}", PAGE_SIZES);
    }
    bff.navigate(Route::List).await;

    let list = bff.list();
    if list.phase == Phase::Failed {
        anyhow::bail!("{}", list.error.unwrap_or_default());
    }

    if let Some(city) = &args.city {
        bff.set_filter(FilterField::City, city);
    }
    if let Some(max_price) = &args.max_price {
        bff.set_filter(FilterField::MaxPrice, max_price);
    }
    if let Some(min_surface) = &args.min_surface {
        bff.set_filter(FilterField::MinSurface, min_surface);
    }
    bff.set_page_size(args.page_size);
    bff.goto_page(args.page);

    let view = bff.list().view();
    if output_json {
        println!("{}", serde_json::to_string_pretty(&view.items)?);
    } else {
        print!("{}", render::list_page(&bff.list(), &view));
    }
    Ok(())
}

/// GET: the detail page.
pub async fn get(bff: &PropertyBff, id: &str, output_json: bool) -> Result<()> {
    bff.navigate(Route::Detail(id.to_string())).await;

    let detail = bff
        .detail()
        .ok_or_else(|| anyhow::anyhow!("detail page did not load"))?;
    let Some(property) = &detail.property else {
        anyhow::bail!("{}", detail.error.unwrap_or_default());
    };

    if output_json {
        println!("{}", serde_json::to_string_pretty(property)?);
    } else {
        print!("{}", render::detail_page(property));
    }
    Ok(())
}

/// Copy the fields of a JSON object into the open form.
fn fill_form(bff: &PropertyBff, json_body: &str) -> Result<()> {
    let body: Value =
        serde_json::from_str(json_body).map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;
    let obj = body
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Invalid JSON: expected an object"))?;

    for field in [
        FormField::Title,
        FormField::City,
        FormField::Price,
        FormField::Surface,
        FormField::Description,
    ] {
        let text = match obj.get(field.key()) {
            None => continue,
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => anyhow::bail!("{}: unexpected value {}", field.key(), other),
        };
        bff.edit_field(field, &text);
    }
    Ok(())
}

/// Submit the open form; success is a return to the list.
async fn submit(bff: &PropertyBff) -> Result<()> {
    bff.submit().await;
    if bff.route() == Some(Route::List) {
        return Ok(());
    }
    let form = bff
        .form()
        .ok_or_else(|| anyhow::anyhow!("form page did not load"))?;
    eprint!("{}", render::form_errors(&form));
    anyhow::bail!("{}", form.error.unwrap_or_else(|| "Formulaire invalide".into()))
}

/// CREATE: the form page in create mode.
pub async fn create(bff: &PropertyBff, json_body: &str) -> Result<()> {
    bff.navigate(Route::New).await;
    fill_form(bff, json_body)?;
    submit(bff).await?;
    println!("Propriété créée.");
    Ok(())
}

/// UPDATE: the form page in edit mode, prefilled from the server.
pub async fn update(bff: &PropertyBff, id: &str, json_body: &str) -> Result<()> {
    bff.navigate(Route::Edit(id.to_string())).await;
    if let Some(error) = bff.form().and_then(|f| f.error) {
        anyhow::bail!("{}", error);
    }
    fill_form(bff, json_body)?;
    submit(bff).await?;
    println!("Propriété {} mise à jour.", id);
    Ok(())
}

/// DELETE: from the detail page.
pub async fn delete(bff: &PropertyBff, id: &str) -> Result<()> {
    bff.navigate(Route::Detail(id.to_string())).await;
    bff.delete_shown().await;

    if bff.route() != Some(Route::List) {
        let error = bff.detail().and_then(|d| d.error).unwrap_or_default();
        anyhow::bail!("{}", error);
    }
    println!("Propriété {} supprimée.", id);
    Ok(())
}

/// STATUS: check server health.
pub async fn status(client: &PropertyClient) -> Result<()> {
    println!("Server:    {}", client.base_url());
    match client.health().await {
        Ok(_) => println!("Status:    connected"),
        Err(e) => println!("Status:    disconnected ({})", e),
    }
    Ok(())
}
