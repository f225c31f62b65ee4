pub mod dashboard_view;
