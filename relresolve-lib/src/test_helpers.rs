pub mod mock_release_source;
