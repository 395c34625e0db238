//! Controller generator command.

use crate::commands::ui;
use crate::scaffold;
use async_trait::async_trait;
use miette::{IntoDiagnostic, Result};
use rondo_command::{Command, CommandInput, CommandOutput, OptionSpec};
use rondo_diagnostics::RondoError;
use std::fs;

/// Generate a new controller file in a bundle.
///
/// `$ rondo create:controller my-bundle hello`
pub struct CreateControllerCommand;

#[async_trait]
impl Command for CreateControllerCommand {
    fn name(&self) -> &str {
        "create:controller <bundle> <name>"
    }

    fn description(&self) -> &str {
        "Generate a new controller file in a bundle"
    }

    fn arguments(&self) -> Vec<String> {
        vec!["bundle".to_string(), "name".to_string()]
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::new(
            "rest",
            "--rest [model]",
            "Create a REST controller for a model",
        )]
    }

    async fn execute(&self, input: &CommandInput, output: &mut dyn CommandOutput) -> Result<()> {
        let bundle = input.argument("bundle").unwrap_or_default();
        let name = input.argument("name").unwrap_or_default();
        let cwd = input.working_dir();
        let bundle_dir = cwd.join("src").join(bundle);

        if !rondo_bundle::is_project_root(cwd) {
            return Err(RondoError::NotAProject.into());
        }
        if !bundle_dir.exists() {
            return Err(RondoError::bundle_missing(bundle, &bundle_dir).into());
        }

        let controller_dir = bundle_dir.join("lib").join("controller");
        let controller_path = controller_dir.join(format!("{}.js", name.to_lowercase()));
        if controller_path.exists() {
            return Err(RondoError::target_exists(&controller_path).into());
        }

        fs::create_dir_all(&controller_dir).into_diagnostic()?;

        output.writeln("----------------------------------------------");
        output.writeln(&format!("Generating controller: {name}"));
        output.writeln(&format!("Target: {}", controller_path.display()));
        output.writeln("----------------------------------------------");

        let class_name = format!("{}Controller", capitalize(name));
        let route = name.to_lowercase();

        let rest = input.option("rest");
        let contents = if rest.is_present() {
            let model = rest.as_str().unwrap_or(&route);
            scaffold::render(
                scaffold::REST_CONTROLLER_TEMPLATE,
                &[
                    ("##CONTROLLER_NAME##", class_name.as_str()),
                    ("##CONTROLLER_ROUTE##", &route),
                    ("##MODEL##", model),
                ],
            )
        } else {
            scaffold::render(
                scaffold::CONTROLLER_TEMPLATE,
                &[
                    ("##CONTROLLER_NAME##", class_name.as_str()),
                    ("##CONTROLLER_ROUTE##", &route),
                ],
            )
        };
        fs::write(&controller_path, contents).into_diagnostic()?;

        ui::success(format!("Created controller {class_name}"));
        Ok(())
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondo_command::{MemoryOutput, OptionValue};
    use std::collections::BTreeMap;
    use std::path::Path;

    fn input(cwd: &Path, bundle: &str, name: &str, rest: OptionValue) -> CommandInput {
        let mut arguments = BTreeMap::new();
        arguments.insert("bundle".to_string(), Some(bundle.to_string()));
        arguments.insert("name".to_string(), Some(name.to_string()));
        let mut options = BTreeMap::new();
        options.insert("rest".to_string(), rest);
        CommandInput::new(arguments, options, "development", cwd.to_path_buf())
    }

    fn project_with_bundle(dir: &Path, bundle: &str) {
        std::fs::write(dir.join(".rondo"), "").unwrap();
        std::fs::create_dir_all(dir.join("src").join(bundle)).unwrap();
    }

    #[tokio::test]
    async fn generates_a_plain_controller() {
        let dir = tempfile::tempdir().unwrap();
        project_with_bundle(dir.path(), "shop");
        let mut output = MemoryOutput::default();

        CreateControllerCommand
            .execute(
                &input(dir.path(), "shop", "Basket", OptionValue::Absent),
                &mut output,
            )
            .await
            .unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("src/shop/lib/controller/basket.js")).unwrap();
        assert!(contents.contains("BasketController"));
        assert!(contents.contains("@Route(\"/basket\")"));
        assert!(!contents.contains("@Rest:Controller"));
    }

    #[tokio::test]
    async fn generates_a_rest_controller_for_a_model() {
        let dir = tempfile::tempdir().unwrap();
        project_with_bundle(dir.path(), "shop");
        let mut output = MemoryOutput::default();

        CreateControllerCommand
            .execute(
                &input(
                    dir.path(),
                    "shop",
                    "order",
                    OptionValue::Value("Order".to_string()),
                ),
                &mut output,
            )
            .await
            .unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("src/shop/lib/controller/order.js")).unwrap();
        assert!(contents.contains("@Rest:Controller"));
        assert!(contents.contains("model=\"Order\""));
    }

    #[tokio::test]
    async fn requires_the_bundle_to_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".rondo"), "").unwrap();
        let mut output = MemoryOutput::default();

        let err = CreateControllerCommand
            .execute(
                &input(dir.path(), "ghost", "Basket", OptionValue::Absent),
                &mut output,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn refuses_an_existing_controller_file() {
        let dir = tempfile::tempdir().unwrap();
        project_with_bundle(dir.path(), "shop");
        let controller_dir = dir.path().join("src/shop/lib/controller");
        std::fs::create_dir_all(&controller_dir).unwrap();
        std::fs::write(controller_dir.join("basket.js"), "").unwrap();
        let mut output = MemoryOutput::default();

        let err = CreateControllerCommand
            .execute(
                &input(dir.path(), "shop", "basket", OptionValue::Absent),
                &mut output,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
