/// Macro to register apps in the registry with automatic initializer generation
///
/// Usage in games/mod.rs:
/// ```ignore
/// register_apps! {
///     guessing => {
///         app: GuessingGame,
///         id: "guess",
///         name: "Number Guessing",
///         description: "Guess the number"
///     }
/// }
/// ```
#[macro_export]
macro_rules! register_apps {
    (
        $(
            $module:ident => {
                app: $app:ident,
                id: $id:expr,
                name: $name:expr,
                description: $desc:expr
            }
        ),* $(,)?
    ) => {
        /// Get all available apps with their metadata and initializers
        pub fn get_all_apps() -> Vec<AppRegistry> {
            vec![
                $(
                    AppRegistry {
                        info: AppInfo {
                            id: $id,
                            name: $name,
                            description: $desc,
                        },
                        initializer: |config, terminal| {
                            Box::pin(async move {
                                use $crate::core::engine::Engine;
                                use $crate::games::$module::$app;

                                let app = $app::new(&config);
                                Engine::new(app).run(terminal).await
                            })
                        },
                    }
                ),*
            ]
        }

        /// Get an app by ID
        pub fn get_app(id: &str) -> Option<AppRegistry> {
            get_all_apps().into_iter().find(|a| a.info.id == id)
        }
    };
}
