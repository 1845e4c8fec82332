//! Fixed prompt templates for the scaffold node.
//!
//! Placeholders use the `{name}` syntax of [`crate::prompt`].

/// Heading that opens every assembled prompt.
pub const HEADING: &str = "# NX Monorepo Generation and PR Creation\n";

/// Used when the caller leaves `pr_description` empty.
pub const DEFAULT_PR_DESCRIPTION: &str =
    "Initialize NX monorepo structure with standard configuration and best practices";

/// Workspace layout. Variables: `project_name`.
pub const BASE_TEMPLATE: &str = "
Task: Initialize an NX monorepo and create a pull request with the complete implementation.

Project Requirements:

Project name: {project_name}

1. Initialize a new NX workspace with:
   - Integrated monorepo style
   - Apps directory structure
   - Package-based scope (@{project_name})
   - TypeScript configuration
   - ESLint setup
   - Jest for testing

2. Create the following applications:
   - Frontend app using React + TypeScript
   - Backend API using NestJS
   - Admin dashboard using React + TypeScript

3. Create shared libraries:
   - @{project_name}/shared/types (TypeScript interfaces and types)
   - @{project_name}/shared/ui (React components)
   - @{project_name}/shared/utils (Helper functions)
   - @{project_name}/shared/api-interfaces (API DTOs and interfaces)

4. Set up the following configuration files:
   - nx.json with cache and affected configuration
   - .prettierrc with standard rules
   - .eslintrc.json with TypeScript and React rules
   - jest.config.js for each app and lib
   - tsconfig.base.json with path aliases
   - .gitignore with standard exclusions

5. Include basic CI setup:
   - GitHub Actions workflow for build and test
   - Workspace lint configuration
   - Build targets for all apps and libs

6. Dependencies to include:
   - @nx/react
   - @nx/nest
   - @nx/js
   - @types/node
   - typescript
   - @testing-library/react
   - jest
   - eslint
   - prettier

7. Set up scripts in root package.json:
   - build:all
   - test:all
   - lint:all
   - serve:frontend
   - serve:backend
   - serve:admin

Implementation Guidelines:
- Follow NX best practices for module boundaries
- Implement library categories (feature, ui, util, data-access)
- Set up proper import restrictions
- Configure dependency management
";

/// Branch and pull request steps.
///
/// Variables: `repository_url`, `base_branch`, `pr_title`, `pr_description`.
pub const GIT_TEMPLATE: &str = "
Git Operations:
1. Clone the repository: {repository_url}
2. Create a new branch from {base_branch}
3. Implement all required files and configurations
4. Stage all changes
5. Create a pull request with:
   - Title: {pr_title}
   - Base branch: {base_branch}
   - Description: {pr_description}

Please include in the PR description:
1. Development server startup instructions
2. Test execution commands
3. Build process instructions
4. Component/module generation commands
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{render_template, vars};

    #[test]
    fn base_template_renders_with_project_name_only() {
        let out = render_template(BASE_TEMPLATE, &vars([("project_name", "acme")])).unwrap();
        assert!(out.contains("Project name: acme\n"));
        assert!(out.contains("Package-based scope (@acme)"));
        assert!(out.contains("@acme/shared/api-interfaces"));
        assert!(!out.contains('{'));
    }

    #[test]
    fn git_template_renders_with_its_variables() {
        let variables = vars([
            ("repository_url", "https://example.com/r.git"),
            ("base_branch", "develop"),
            ("pr_title", "feat: init"),
            ("pr_description", DEFAULT_PR_DESCRIPTION),
        ]);
        let out = render_template(GIT_TEMPLATE, &variables).unwrap();

        assert!(out.contains("1. Clone the repository: https://example.com/r.git\n"));
        assert!(out.contains("2. Create a new branch from develop\n"));
        assert!(out.contains("   - Base branch: develop\n"));
        assert!(out.contains(&format!("   - Description: {}\n", DEFAULT_PR_DESCRIPTION)));
    }
}
