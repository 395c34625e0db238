//! Embedded scaffolding templates.
//!
//! Project and bundle skeletons are embedded template trees, written to
//! disk with `##NAME##`-style placeholder substitution.

use std::fs;
use std::io;
use std::path::Path;

/// One file of an embedded template tree.
struct TemplateFile {
    path: &'static str,
    contents: &'static str,
}

pub const CONTROLLER_TEMPLATE: &str = include_str!("../templates/etc/controller.js");
pub const REST_CONTROLLER_TEMPLATE: &str = include_str!("../templates/etc/rest-controller.js");

const PROJECT_FILES: &[TemplateFile] = &[
    TemplateFile {
        path: "package.json",
        contents: include_str!("../templates/project/package.json"),
    },
    TemplateFile {
        path: "app/app.js",
        contents: include_str!("../templates/project/app/app.js"),
    },
    TemplateFile {
        path: "app/cli.js",
        contents: include_str!("../templates/project/app/cli.js"),
    },
    TemplateFile {
        path: "app/config/config.toml",
        contents: include_str!("../templates/project/app/config/config.toml"),
    },
    TemplateFile {
        path: "app/config/parameters.toml.dist",
        contents: include_str!("../templates/project/app/config/parameters.toml.dist"),
    },
    TemplateFile {
        path: "src/demo-bundle/lib/controller/default.js",
        contents: include_str!("../templates/project/src/demo-bundle/lib/controller/default.js"),
    },
    TemplateFile {
        path: "src/demo-bundle/lib/model/user.js",
        contents: include_str!("../templates/project/src/demo-bundle/lib/model/user.js"),
    },
];

const BUNDLE_FILES: &[TemplateFile] = &[
    TemplateFile {
        path: "lib/dependency-injection/configuration.js",
        contents: include_str!("../templates/bundle/lib/dependency-injection/configuration.js"),
    },
    TemplateFile {
        path: "lib/controller/default.js",
        contents: include_str!("../templates/bundle/lib/controller/default.js"),
    },
    TemplateFile {
        path: "lib/resources/config/config.default.toml",
        contents: include_str!("../templates/bundle/lib/resources/config/config.default.toml"),
    },
    TemplateFile {
        path: "lib/command/HelloCommand.toml",
        contents: include_str!("../templates/bundle/lib/command/HelloCommand.toml"),
    },
    TemplateFile {
        path: "lib/command/hello.js",
        contents: include_str!("../templates/bundle/lib/command/hello.js"),
    },
];

/// Substitute `##PLACEHOLDER##` markers in a template.
pub fn render(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (marker, value) in replacements {
        rendered = rendered.replace(marker, value);
    }
    rendered
}

/// Write a template tree below `target`, substituting placeholders.
fn write_tree(
    target: &Path,
    files: &[TemplateFile],
    replacements: &[(&str, &str)],
) -> io::Result<()> {
    for file in files {
        let path = target.join(file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, render(file.contents, replacements))?;
    }
    Ok(())
}

/// Write a fresh project skeleton, marker included.
pub fn write_project(target: &Path, name: &str) -> io::Result<()> {
    write_tree(target, PROJECT_FILES, &[("##PROJECT_NAME##", name)])?;
    fs::write(target.join(rondo_bundle::PROJECT_MARKER), "")
}

/// Write a fresh bundle skeleton.
pub fn write_bundle(target: &Path, name: &str) -> io::Result<()> {
    write_tree(target, BUNDLE_FILES, &[("##BUNDLE_NAME##", name)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_every_marker() {
        let rendered = render(
            "name: ##NAME##, route: /##NAME##",
            &[("##NAME##", "basket")],
        );
        assert_eq!(rendered, "name: basket, route: /basket");
    }

    #[test]
    fn project_tree_is_fully_substituted() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("myproject");
        write_project(&target, "myproject").unwrap();

        for file in PROJECT_FILES {
            let contents = fs::read_to_string(target.join(file.path)).unwrap();
            assert!(
                !contents.contains("##PROJECT_NAME##"),
                "unsubstituted marker in {}",
                file.path
            );
        }
        assert!(target.join(rondo_bundle::PROJECT_MARKER).is_file());
    }

    #[test]
    fn bundle_descriptor_carries_the_bundle_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("hello");
        write_bundle(&target, "hello").unwrap();

        let descriptor =
            fs::read_to_string(target.join("lib/command/HelloCommand.toml")).unwrap();
        assert!(descriptor.contains("hello:hello"));
        assert!(!descriptor.contains("##BUNDLE_NAME##"));
    }
}
