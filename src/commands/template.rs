use super::AppContext;
use crate::services::export_service;
use crate::utils::errors::AppError;

pub fn execute(ctx: &AppContext) -> Result<(), AppError> {
    let path = export_service::write_template(&ctx.output_dir)
        .map_err(|e| AppError::io(format!("Failed to write template to {}", ctx.output_dir.display()), e))?;
    println!("Template written to {}", path.display());
    Ok(())
}
