//! Fixed names the pipeline matches against and generates.

/// Marker attribute.
pub const MARKER: &str = "screenkit.Screen";
pub const MARKER_ARGUMENT_TYPE: &str = "argumentType";
pub const MARKER_NULLABLE: &str = "nullable";

/// "No argument" sentinel, the default of `argumentType`.
pub const NO_ARGUMENT: &str = "screenkit.NoArgument";

/// Base type every marked owner must derive from.
pub const CONTROLLER_BASE: &str = "androidx.fragment.app.Fragment";

/// Transport capability every argument type must implement.
pub const TRANSPORT_CAPABILITY: &str = "android.os.Parcelable";

pub const NAVIGATION_DESCRIPTOR: &str = "screenkit.NavigationDescriptor";
pub const STRING: &str = "kotlin.String";

pub const DEFAULT_CONTAINER: &str = "Companion";
pub const KEY: &str = "KEY";
pub const ARG: &str = "arg";
pub const CREATE_SCREEN: &str = "createScreen";
pub const BINDING: &str = "binding";

pub const BINDING_SUFFIX: &str = "Binding";
pub const DEFAULT_BINDING_PACKAGE: &str = "databinding";
/// Receiver segment of `R.layout.<id>`.
pub const LAYOUT_RECEIVER: &str = "layout";
